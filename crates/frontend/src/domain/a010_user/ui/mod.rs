mod form;
mod picker;

pub use form::UserForm;
pub use picker::{fetch_users, UserPicker, UserPickerItem};
