//! Raw config types matching the JSON files (models.json + packages.json).

use serde::{Deserialize, Serialize};

/// Association cardinality as declared on the owning model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    HasMany,
    HasOne,
    BelongsTo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssociationConfig {
    pub name: String,
    pub kind: AssociationKind,
    /// Declared target type path, e.g. "Blogging::Comment".
    pub target: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Type path, e.g. "Blogging::Comment".
    pub name: String,
    /// Direct supertypes (superclass, interfaces). Used to accept subtype targets on associations.
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub associations: Vec<AssociationConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceConfig {
    pub type_name: String,
    #[serde(default)]
    pub singular: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    /// Mount prefix, e.g. "/admin". "/" mounts at the root.
    pub mount_path: String,
    /// Dynamic scope segment name (e.g. "organization") for packages scoped by a parent entity.
    #[serde(default)]
    pub scope_param: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceConfig>,
}

/// All config types in one struct for in-memory loading.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FullConfig {
    pub models: Vec<ModelConfig>,
    pub packages: Vec<PackageConfig>,
}
