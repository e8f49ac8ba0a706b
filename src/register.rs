//! Resource register: the ordered list of resources a package routes.

use crate::config::ModelCatalog;
use crate::error::ConfigError;
use crate::inflect::is_type_path;
use serde::Serialize;

/// One registered resource. Immutable once registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub type_name: String,
    /// Pluralized route name, e.g. "blogging_comments".
    pub route_name: String,
    /// Routed as a singular resource (no index, no id segment).
    pub singular: bool,
}

/// Registration order is kept; it is only observable in error messages, never in the bound route order.
#[derive(Clone, Debug, Default)]
pub struct ResourceRegister {
    entries: Vec<ResourceDescriptor>,
}

impl ResourceRegister {
    pub fn new() -> Self {
        ResourceRegister { entries: Vec::new() }
    }

    /// Register `type_name`. Blank, malformed or unknown types are rejected; duplicate
    /// route names are accepted here and rejected when routes are drawn.
    pub fn register(
        &mut self,
        catalog: &ModelCatalog,
        type_name: &str,
        singular: bool,
    ) -> Result<&ResourceDescriptor, ConfigError> {
        let type_name = type_name.trim();
        if type_name.is_empty() {
            return Err(ConfigError::InvalidResource {
                type_name: type_name.to_string(),
                reason: "type name is blank",
            });
        }
        if !is_type_path(type_name) {
            return Err(ConfigError::InvalidResource {
                type_name: type_name.to_string(),
                reason: "not a type path",
            });
        }
        let info = catalog
            .get(type_name)
            .ok_or_else(|| ConfigError::UnknownModel(type_name.to_string()))?;
        let descriptor = ResourceDescriptor {
            type_name: type_name.to_string(),
            route_name: info.model_name.plural.clone(),
            singular,
        };
        tracing::debug!(type_name, route_name = %descriptor.route_name, singular, "resource registered");
        self.entries.push(descriptor);
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn list(&self) -> &[ResourceDescriptor] {
        &self.entries
    }

    /// Drop every entry. Only used before redrawing the whole package.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, FullConfig, ModelConfig};

    fn catalog() -> ModelCatalog {
        let models = ["Post", "Blogging::Comment"]
            .into_iter()
            .map(|name| ModelConfig {
                name: name.into(),
                supertypes: vec![],
                associations: vec![],
            })
            .collect();
        resolve(&FullConfig {
            models,
            packages: vec![],
        })
        .unwrap()
    }

    #[test]
    fn registers_in_order_with_route_names() {
        let catalog = catalog();
        let mut register = ResourceRegister::new();
        register.register(&catalog, "Blogging::Comment", false).unwrap();
        let post = register.register(&catalog, "Post", true).unwrap();
        assert_eq!(post.route_name, "posts");
        assert!(post.singular);

        let names: Vec<_> = register.list().iter().map(|d| d.route_name.as_str()).collect();
        assert_eq!(names, ["blogging_comments", "posts"]);
    }

    #[test]
    fn rejects_blank_malformed_and_unknown_types() {
        let catalog = catalog();
        let mut register = ResourceRegister::new();
        assert!(matches!(
            register.register(&catalog, "  ", false),
            Err(ConfigError::InvalidResource { reason: "type name is blank", .. })
        ));
        assert!(matches!(
            register.register(&catalog, "blogging::comment", false),
            Err(ConfigError::InvalidResource { .. })
        ));
        assert!(matches!(
            register.register(&catalog, "Comment", false),
            Err(ConfigError::UnknownModel(ref n)) if n == "Comment"
        ));
        assert!(register.is_empty());
    }

    #[test]
    fn duplicates_are_accepted_and_clear_empties() {
        let catalog = catalog();
        let mut register = ResourceRegister::new();
        register.register(&catalog, "Post", false).unwrap();
        register.register(&catalog, "Post", false).unwrap();
        assert_eq!(register.len(), 2);
        register.clear();
        assert!(register.is_empty());
    }
}
