//! axum routers over the application state.

pub mod common;
pub mod resource;

pub use common::common_routes;
pub use resource::{introspection_routes, resource_routes};
