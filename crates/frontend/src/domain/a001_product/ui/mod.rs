mod details;
mod import;
mod picker;

pub use details::ProductDetails;
pub use import::ProductImport;
pub use picker::{ProductPicker, ProductPickerItem};
