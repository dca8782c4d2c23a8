//! Policy submissions: field rules, request resolution and the HTTP surface.

pub mod handlers;
pub mod models;
pub mod validation;

pub use handlers::config;
pub use models::{PolicyRequest, PolicySubmission, VehicleType};
