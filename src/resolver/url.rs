//! Path generation for resources, records and associations.
//!
//! Every path goes through `RouteTable::path_for`, so a resolved path always names a bound route.

use crate::config::ModelCatalog;
use crate::error::ResolveError;
use crate::resolver::{resolve_association, Action, Record, ResourceTarget, UrlOptions};
use crate::routing::{RouteConfig, RouteTable, RouteType};

fn route_name(catalog: &ModelCatalog, type_name: &str) -> Result<String, ResolveError> {
    catalog
        .get(type_name)
        .map(|info| info.model_name.plural.clone())
        .ok_or_else(|| ResolveError::UnknownModel(type_name.to_string()))
}

fn lookup<'t>(table: &'t RouteTable, key: &str) -> Result<&'t RouteConfig, ResolveError> {
    table.config(key).ok_or_else(|| ResolveError::Unroutable {
        package: table.package.clone(),
        key: key.to_string(),
    })
}

/// Resolve `target` to a path in `table`'s package.
///
/// Without a parent the target's top-level route is used; with a parent the nested route at
/// `<parent route name>/<association>` is used, the association being given, taken from a
/// route symbol, or inferred from the target type. Singular routes never carry a record id.
pub fn resolve_url(
    catalog: &ModelCatalog,
    table: &RouteTable,
    target: ResourceTarget<'_>,
    options: &UrlOptions<'_>,
) -> Result<String, ResolveError> {
    let mut params: Vec<&str> = Vec::new();
    if let Some(param) = &table.scope_param {
        let scope = options.scope.ok_or_else(|| ResolveError::MissingScope {
            package: table.package.clone(),
            param: param.clone(),
        })?;
        params.push(scope);
    }

    let record = match target {
        ResourceTarget::Record(record) => Some(record),
        _ => None,
    };

    let Some(parent) = options.parent else {
        let key = match target {
            ResourceTarget::None => {
                return Err(ResolveError::InvalidTarget("an empty target needs a parent".into()))
            }
            ResourceTarget::Route(name) => name.to_string(),
            ResourceTarget::Model(type_name) => route_name(catalog, type_name)?,
            ResourceTarget::Record(record) => route_name(catalog, &record.model)?,
        };
        let config = lookup(table, &key)?;
        return action_path(table, config, &key, record, options.action, params);
    };

    let association = match (options.association, target) {
        (Some(association), _) => association.to_string(),
        (None, ResourceTarget::None) => {
            return Err(ResolveError::InvalidTarget(
                "an empty target needs an explicit association".into(),
            ))
        }
        (None, target) => resolve_association(catalog, &target, parent)?,
    };

    let parent_key = route_name(catalog, &parent.model)?;
    if lookup(table, &parent_key)?.route_type == RouteType::Collection {
        params.push(&parent.id);
    }
    let key = format!("{}/{}", parent_key, association);
    let config = lookup(table, &key)?;
    action_path(table, config, &key, record, options.action, params)
}

fn action_path<'p>(
    table: &RouteTable,
    config: &RouteConfig,
    key: &str,
    record: Option<&'p Record>,
    action: Option<Action>,
    mut params: Vec<&'p str>,
) -> Result<String, ResolveError> {
    let action = action.unwrap_or(if record.is_some() { Action::Show } else { Action::Index });
    let helper = match config.route_type {
        RouteType::Collection => match action {
            Action::Index => config.collection_helper.clone().unwrap_or_default(),
            Action::New => format!("new_{}", config.member_helper),
            Action::Show | Action::Edit => {
                let record = record.ok_or_else(|| ResolveError::MissingRecord {
                    action: action.as_str(),
                    key: key.to_string(),
                })?;
                params.push(&record.id);
                if action == Action::Edit {
                    format!("edit_{}", config.member_helper)
                } else {
                    config.member_helper.clone()
                }
            }
        },
        RouteType::Singular => match action {
            Action::New => format!("new_{}", config.member_helper),
            Action::Edit => format!("edit_{}", config.member_helper),
            Action::Index | Action::Show => config.member_helper.clone(),
        },
    };
    table.path_for(&helper, &params)
}
