pub mod field;

pub use field::{FieldError, FormNotice};
