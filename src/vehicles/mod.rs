//! Vehicle brand and model catalog used by the form's autocomplete.

pub mod catalog;
pub mod handlers;
pub mod models;

pub use catalog::{CatalogError, VehicleCatalog, VehicleCatalogCache};
pub use handlers::config;
