//! Route introspection: packages, their route tables, and path resolution on demand.

use crate::error::{AppError, ResolveError};
use crate::resolver::{Action, Record, ResourceTarget, UrlOptions};
use crate::response::{success_many, success_one};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub mount_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_param: Option<String>,
    pub resources: Vec<String>,
    pub routes: usize,
}

pub async fn list_packages(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let app = state.load();
    let packages = app
        .packages()
        .map(|p| PackageSummary {
            name: p.name().to_string(),
            mount_path: p.mount_path().to_string(),
            scope_param: p.scope_param().map(str::to_string),
            resources: p.resources().iter().map(|r| r.type_name.clone()).collect(),
            routes: p.routes().routes().len(),
        })
        .collect();
    success_many(packages)
}

pub async fn package_routes(
    State(state): State<AppState>,
    Path(package): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let app = state.load();
    let package = app.package(&package).ok_or_else(|| AppError::NotFound(package.clone()))?;
    Ok(success_one(package.routes().clone()))
}

/// Query for `GET /_routes/:package/resolve`. A record is `model` + `id`; `model` alone is the
/// type; `route` is a route symbol; none of them is the empty target.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    pub model: Option<String>,
    pub id: Option<String>,
    pub route: Option<String>,
    pub parent_model: Option<String>,
    pub parent_id: Option<String>,
    pub association: Option<String>,
    pub action: Option<String>,
    pub package: Option<String>,
    pub scope: Option<String>,
}

#[derive(Serialize)]
pub struct Resolved {
    pub path: String,
}

pub async fn resolve_path(
    State(state): State<AppState>,
    Path(current): Path<String>,
    Query(q): Query<ResolveQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let record = match (&q.model, &q.id) {
        (Some(model), Some(id)) => Some(Record::new(model.as_str(), id)),
        _ => None,
    };
    let parent = match (&q.parent_model, &q.parent_id) {
        (Some(model), Some(id)) => Some(Record::new(model.as_str(), id)),
        (None, None) => None,
        _ => return Err(AppError::BadRequest("parent_model and parent_id go together".into())),
    };
    let target = match (&record, &q.model, &q.route) {
        (Some(record), _, _) => ResourceTarget::Record(record),
        (None, Some(model), _) => ResourceTarget::Model(model),
        (None, None, Some(route)) => ResourceTarget::Route(route),
        (None, None, None) => ResourceTarget::None,
    };
    let action = q
        .action
        .as_deref()
        .map(str::parse::<Action>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let options = UrlOptions {
        parent: parent.as_ref(),
        association: q.association.as_deref(),
        action,
        package: q.package.as_deref(),
        scope: q.scope.as_deref(),
    };

    let app = state.load();
    let path = app
        .resource_url_for(&current, target, &options)
        .map_err(|e| match e {
            ResolveError::UnknownPackage(name) => AppError::NotFound(name),
            e => AppError::BadRequest(e.to_string()),
        })?;
    Ok(success_one(Resolved { path }))
}
