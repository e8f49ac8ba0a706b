//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Boot-time errors: registration, validation and materialization. Fatal for the package.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("invalid resource '{type_name}': {reason}")]
    InvalidResource { type_name: String, reason: &'static str },
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("duplicate route in package {package}: {name}")]
    DuplicateRoute { package: String, name: String },
    #[error("duplicate package: {0}")]
    DuplicatePackage(String),
    #[error("invalid package {name}: {reason}")]
    InvalidPackage { name: String, reason: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Request-time errors. Each one means the caller asked for a path that cannot exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no association to {target} found on {parent} (tried: {})", .candidates.join(", "))]
    AssociationNotFound {
        target: String,
        parent: String,
        candidates: Vec<String>,
    },
    #[error(
        "ambiguous association to {target} on {parent}: {}; pass the association name explicitly",
        .matches.join(", ")
    )]
    AmbiguousAssociation {
        target: String,
        parent: String,
        matches: Vec<String>,
    },
    #[error("no route for '{key}' in package {package}")]
    Unroutable { package: String, key: String },
    #[error("unknown package: {0}")]
    UnknownPackage(String),
    #[error("unknown model: {0}")]
    UnknownModel(String),
    #[error("unknown route helper '{helper}' in package {package}")]
    UnknownHelper { package: String, helper: String },
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    #[error("action {action} on {key} needs a record")]
    MissingRecord { action: &'static str, key: String },
    #[error("package {package} is scoped by :{param}; a scope value is required")]
    MissingScope { package: String, param: String },
    #[error("invalid path parameter '{0}'")]
    InvalidParam(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Resolve(ResolveError::UnknownPackage(_)) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Resolve(_) => (StatusCode::INTERNAL_SERVER_ERROR, "resolve_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
