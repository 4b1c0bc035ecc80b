pub mod aggregate;
pub mod excel;
