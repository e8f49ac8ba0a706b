//! Resolved model catalog: reflection metadata validated and flattened for runtime use.

use crate::config::AssociationKind;
use crate::inflect::ModelName;
use std::collections::{BTreeMap, HashSet};

/// One association as declared on its owning model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssociationInfo {
    pub name: String,
    /// Declared target type path; records of this type or any subtype are accepted.
    pub target: String,
    pub cardinality: AssociationKind,
}

#[derive(Clone, Debug)]
pub struct ModelInfo {
    pub name: String,
    pub model_name: ModelName,
    /// Direct supertypes only; see `ModelCatalog::is_a` for the transitive check.
    pub supertypes: Vec<String>,
    pub associations: Vec<AssociationInfo>,
}

impl ModelInfo {
    pub fn association(&self, name: &str) -> Option<&AssociationInfo> {
        self.associations.iter().find(|a| a.name == name)
    }

    /// Has-many and has-one associations, in declaration order.
    pub fn nestable_associations(&self) -> impl Iterator<Item = &AssociationInfo> {
        self.associations
            .iter()
            .filter(|a| matches!(a.cardinality, AssociationKind::HasMany | AssociationKind::HasOne))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ModelCatalog {
    models: BTreeMap<String, ModelInfo>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        ModelCatalog {
            models: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, info: ModelInfo) {
        self.models.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &str) -> Option<&ModelInfo> {
        self.models.get(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Whether `type_name` is `declared` or inherits from it through any chain of supertypes.
    pub fn is_a(&self, type_name: &str, declared: &str) -> bool {
        let mut seen = HashSet::new();
        let mut stack = vec![type_name];
        while let Some(current) = stack.pop() {
            if current == declared {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(info) = self.models.get(current) {
                stack.extend(info.supertypes.iter().map(String::as_str));
            }
        }
        false
    }
}
