pub mod envelope;
pub mod query;
pub mod validation;
