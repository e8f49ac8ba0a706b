//! Materialized route table: the RouteConfig lookup table plus the bound URL tree.

use crate::error::{ConfigError, ResolveError};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Shape of a resource route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    /// `resources`: index/new/create plus member routes under `/:id`.
    Collection,
    /// `resource`: one implicit record, never an id segment.
    Singular,
}

/// One row of the lookup table, keyed by route name (`posts`) or `parent/association` (`posts/comments`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteConfig {
    pub route_type: RouteType,
    pub controller: String,
    pub path: String,
    pub concern_name: String,
    /// Named route of the index action; `None` for singular routes.
    pub collection_helper: Option<String>,
    /// Named route of show; new/edit are `new_<member_helper>` and `edit_<member_helper>`.
    pub member_helper: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Patch => "PATCH",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl std::str::FromStr for Verb {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" | "HEAD" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PATCH" => Ok(Verb::Patch),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(ResolveError::InvalidParam(s.to_string())),
        }
    }
}

/// One route of the bound URL tree. Patterns use `:name` for dynamic segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoundRoute {
    pub verb: Verb,
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
    pub controller: String,
    pub action: String,
    pub concern: String,
}

impl BoundRoute {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.pattern.split('/').filter(|s| !s.is_empty())
    }

    fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments().filter_map(|s| s.strip_prefix(':'))
    }
}

/// A request path matched against the bound tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub route: BoundRoute,
    pub params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    pub package: String,
    pub mount_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_param: Option<String>,
    configs: BTreeMap<String, RouteConfig>,
    /// Concern names in bind order.
    concerns: Vec<String>,
    /// (concern name, scope) pairs already bound. A top-level and a nested concern may share a name.
    #[serde(skip)]
    bound: BTreeSet<(String, String)>,
    routes: Vec<BoundRoute>,
    #[serde(skip)]
    helpers: BTreeMap<String, usize>,
}

impl RouteTable {
    pub fn new(package: &str, mount_path: &str, scope_param: Option<&str>) -> Self {
        RouteTable {
            package: package.to_string(),
            mount_path: mount_path.to_string(),
            scope_param: scope_param.map(str::to_string),
            configs: BTreeMap::new(),
            concerns: Vec::new(),
            bound: BTreeSet::new(),
            routes: Vec::new(),
            helpers: BTreeMap::new(),
        }
    }

    /// Pattern prefix every route of this package starts with: mount path plus the scope segment.
    pub fn base_pattern(&self) -> String {
        let mount = self.mount_path.trim_end_matches('/');
        match &self.scope_param {
            Some(param) => format!("{}/:{}", mount, param),
            None => mount.to_string(),
        }
    }

    pub fn config(&self, key: &str) -> Option<&RouteConfig> {
        self.configs.get(key)
    }

    pub fn configs(&self) -> &BTreeMap<String, RouteConfig> {
        &self.configs
    }

    pub fn concerns(&self) -> &[String] {
        &self.concerns
    }

    pub fn routes(&self) -> &[BoundRoute] {
        &self.routes
    }

    pub fn route(&self, helper: &str) -> Option<&BoundRoute> {
        self.helpers.get(helper).map(|&i| &self.routes[i])
    }

    pub(crate) fn insert_config(&mut self, key: String, config: RouteConfig) -> Result<(), ConfigError> {
        if self.configs.contains_key(&key) {
            return Err(ConfigError::DuplicateRoute {
                package: self.package.clone(),
                name: key,
            });
        }
        self.configs.insert(key, config);
        Ok(())
    }

    pub(crate) fn bind(&mut self, concern: &str, scope: &str, routes: Vec<BoundRoute>) -> Result<(), ConfigError> {
        if self.bound.contains(&(concern.to_string(), scope.to_string())) {
            return Err(self.duplicate(concern.to_string()));
        }
        for route in routes {
            if self.routes.iter().any(|r| r.verb == route.verb && r.pattern == route.pattern) {
                return Err(self.duplicate(format!("{} {}", route.verb.as_str(), route.pattern)));
            }
            if let Some(helper) = &route.helper {
                if self.helpers.contains_key(helper) {
                    return Err(self.duplicate(helper.clone()));
                }
                self.helpers.insert(helper.clone(), self.routes.len());
            }
            self.routes.push(route);
        }
        self.concerns.push(concern.to_string());
        self.bound.insert((concern.to_string(), scope.to_string()));
        Ok(())
    }

    fn duplicate(&self, name: String) -> ConfigError {
        ConfigError::DuplicateRoute {
            package: self.package.clone(),
            name,
        }
    }

    /// Fill the named route's dynamic segments, in pattern order.
    pub fn path_for(&self, helper: &str, params: &[&str]) -> Result<String, ResolveError> {
        let route = self.route(helper).ok_or_else(|| ResolveError::UnknownHelper {
            package: self.package.clone(),
            helper: helper.to_string(),
        })?;
        let expected = route.param_names().count();
        if expected != params.len() {
            return Err(ResolveError::InvalidParam(format!(
                "{} expects {} params, got {}",
                helper,
                expected,
                params.len()
            )));
        }
        let mut values = params.iter();
        let mut path = String::with_capacity(route.pattern.len());
        for segment in route.segments() {
            path.push('/');
            if segment.starts_with(':') {
                let value = values.next().copied().unwrap_or_default();
                if value.is_empty() || value.contains(['/', '?', '#']) {
                    return Err(ResolveError::InvalidParam(value.to_string()));
                }
                path.push_str(value);
            } else {
                path.push_str(segment);
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }

    /// First bound route, in bind order, whose pattern matches `path`.
    pub fn recognize(&self, verb: Verb, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let requested: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.routes.iter().filter(|r| r.verb == verb).find_map(|route| {
            let segments: Vec<&str> = route.segments().collect();
            if segments.len() != requested.len() {
                return None;
            }
            let mut params = BTreeMap::new();
            for (pattern, actual) in segments.iter().zip(&requested) {
                match pattern.strip_prefix(':') {
                    Some(name) => {
                        params.insert(name.to_string(), (*actual).to_string());
                    }
                    None if pattern == actual => {}
                    None => return None,
                }
            }
            Some(RouteMatch {
                route: route.clone(),
                params,
            })
        })
    }
}
