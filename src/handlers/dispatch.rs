//! Request dispatch through the bound route tree.

use crate::error::AppError;
use crate::response::success_one;
use crate::routing::Verb;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{Method, Uri},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Where a request lands: the controller/action pair the host framework should invoke.
#[derive(Serialize)]
pub struct Dispatch {
    pub package: String,
    pub controller: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
    pub params: BTreeMap<String, String>,
}

pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let verb: Verb = method
        .as_str()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unsupported method {}", method)))?;
    let app = state.load();
    let path = uri.path();
    let (package, matched) = app
        .recognize(verb, path)
        .ok_or_else(|| AppError::NotFound(path.to_string()))?;
    tracing::debug!(
        package = package.name(),
        controller = %matched.route.controller,
        action = %matched.route.action,
        "dispatched"
    );
    Ok(success_one(Dispatch {
        package: package.name().to_string(),
        controller: matched.route.controller,
        action: matched.route.action,
        helper: matched.route.helper,
        params: matched.params,
    }))
}
