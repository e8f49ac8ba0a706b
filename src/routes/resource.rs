//! Resource routes: every request path goes through the drawn route tables.
//! A single fallback handler recognizes the path, so route tables can be reloaded without
//! rebuilding the axum router.

use crate::handlers::{dispatch, list_packages, package_routes, resolve_path};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Fallback dispatch for all package routes.
pub fn resource_routes(state: AppState) -> Router {
    Router::new().fallback(dispatch).with_state(state)
}

/// GET /_routes, GET /_routes/:package, GET /_routes/:package/resolve.
pub fn introspection_routes(state: AppState) -> Router {
    Router::new()
        .route("/_routes", get(list_packages))
        .route("/_routes/:package", get(package_routes))
        .route("/_routes/:package/resolve", get(resolve_path))
        .with_state(state)
}
