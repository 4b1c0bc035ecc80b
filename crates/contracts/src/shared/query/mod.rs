pub mod condition;
pub mod descriptor;

pub use condition::*;
pub use descriptor::*;
