mod details;

pub use details::SaleDetails;
