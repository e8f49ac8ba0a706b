//! Request-time resolution: association inference and path generation.

pub mod association;
pub mod url;

pub use association::{candidates, resolve_association};
pub use url::resolve_url;

use crate::error::ResolveError;
use serde::Serialize;

/// A persisted record: its model type and its path parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Record {
    pub model: String,
    pub id: String,
}

impl Record {
    pub fn new(model: impl Into<String>, id: impl ToString) -> Self {
        Record {
            model: model.into(),
            id: id.to_string(),
        }
    }
}

/// What a path is requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceTarget<'a> {
    /// No target: the association context itself (needs a parent and an association).
    None,
    /// A route symbol: a top-level route name, or an association name when a parent is given.
    Route(&'a str),
    /// A model type path.
    Model(&'a str),
    Record(&'a Record),
}

impl<'a> From<&'a Record> for ResourceTarget<'a> {
    fn from(record: &'a Record) -> Self {
        ResourceTarget::Record(record)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Index,
    Show,
    New,
    Edit,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::Show => "show",
            Action::New => "new",
            Action::Edit => "edit",
        }
    }
}

impl std::str::FromStr for Action {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Action::Index),
            "show" => Ok(Action::Show),
            "new" => Ok(Action::New),
            "edit" => Ok(Action::Edit),
            _ => Err(ResolveError::InvalidParam(format!("action {}", s))),
        }
    }
}

/// Context for `resolve_url`. Defaults: no parent, inferred association and action, current package.
#[derive(Clone, Copy, Debug, Default)]
pub struct UrlOptions<'a> {
    pub parent: Option<&'a Record>,
    pub association: Option<&'a str>,
    pub action: Option<Action>,
    /// Package to route through; `None` keeps the current one.
    pub package: Option<&'a str>,
    /// Value of the package's dynamic scope segment, when it has one.
    pub scope: Option<&'a str>,
}

impl<'a> UrlOptions<'a> {
    pub fn parent(mut self, parent: &'a Record) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn association(mut self, association: &'a str) -> Self {
        self.association = Some(association);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn package(mut self, package: &'a str) -> Self {
        self.package = Some(package);
        self
    }

    pub fn scope(mut self, scope: &'a str) -> Self {
        self.scope = Some(scope);
        self
    }
}
