//! Sale details UI module.
//!
//! Simplified MVVM pattern:
//! - model.rs: API functions (quotation check, save)
//! - view_model.rs: ViewModel with commands and state management
//! - view.rs: Leptos component (pure UI)

mod model;
mod view;
mod view_model;

pub use view::SaleDetails;
pub use view_model::SaleDetailsViewModel;
