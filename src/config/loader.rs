//! Load config from in-memory JSON or from a directory holding models.json and packages.json.

use crate::config::catalog::{AssociationInfo, ModelCatalog, ModelInfo};
use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use crate::inflect::ModelName;
use std::path::Path;

/// Build the model catalog from full config (validates first).
pub fn resolve(config: &FullConfig) -> Result<ModelCatalog, ConfigError> {
    validate(config)?;

    let mut catalog = ModelCatalog::new();
    for model in &config.models {
        let associations = model
            .associations
            .iter()
            .map(|a| AssociationInfo {
                name: a.name.clone(),
                target: a.target.clone(),
                cardinality: a.kind,
            })
            .collect();
        catalog.insert(ModelInfo {
            name: model.name.clone(),
            model_name: ModelName::new(&model.name),
            supertypes: model.supertypes.clone(),
            associations,
        });
    }
    tracing::debug!(models = catalog.len(), "model catalog resolved");
    Ok(catalog)
}

/// Parse both config documents from JSON strings.
pub fn from_json(models: &str, packages: &str) -> Result<FullConfig, ConfigError> {
    let models: Vec<ModelConfig> = serde_json::from_str(models).map_err(|e| ConfigError::Load(format!("models: {}", e)))?;
    let packages: Vec<PackageConfig> =
        serde_json::from_str(packages).map_err(|e| ConfigError::Load(format!("packages: {}", e)))?;
    Ok(FullConfig { models, packages })
}

/// Load full config from `<dir>/models.json` and `<dir>/packages.json`. A missing packages.json means no packages.
pub async fn load_from_dir(dir: impl AsRef<Path>) -> Result<FullConfig, ConfigError> {
    let dir = dir.as_ref();
    let models_path = dir.join("models.json");
    let models = tokio::fs::read_to_string(&models_path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", models_path.display(), e)))?;
    let packages_path = dir.join("packages.json");
    let packages = match tokio::fs::read_to_string(&packages_path).await {
        Ok(packages) => packages,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => "[]".into(),
        Err(e) => return Err(ConfigError::Load(format!("{}: {}", packages_path.display(), e))),
    };
    tracing::debug!(dir = %dir.display(), "config loaded");
    from_json(&models, &packages)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: &str = r#"[
        {"name": "Post", "associations": [
            {"name": "comments", "kind": "has_many", "target": "Comment"},
            {"name": "author", "kind": "belongs_to", "target": "User"}
        ]},
        {"name": "Comment", "supertypes": ["Record"]},
        {"name": "Record"},
        {"name": "User"}
    ]"#;

    #[test]
    fn parses_and_resolves_catalog() {
        let config = from_json(MODELS, r#"[{"name": "admin", "mount_path": "/admin", "resources": [{"type_name": "Post"}]}]"#)
            .unwrap();
        assert_eq!(config.packages[0].resources.len(), 1);
        assert!(!config.packages[0].resources[0].singular);

        let catalog = resolve(&config).unwrap();
        assert_eq!(catalog.len(), 4);
        let post = catalog.get("Post").unwrap();
        assert_eq!(post.model_name.plural, "posts");
        assert_eq!(post.nestable_associations().count(), 1);
        assert!(catalog.is_a("Comment", "Record"));
        assert!(!catalog.is_a("Record", "Comment"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = from_json("{", "[]").unwrap_err();
        assert!(matches!(err, ConfigError::Load(ref m) if m.starts_with("models:")));
    }

    #[tokio::test]
    async fn loads_from_directory() {
        let dir = std::env::temp_dir().join(format!("resource-router-loader-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("models.json"), MODELS).await.unwrap();

        let config = load_from_dir(&dir).await.unwrap();
        assert_eq!(config.models.len(), 4);
        assert!(config.packages.is_empty());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn unreadable_packages_file_is_a_load_error() {
        let dir = std::env::temp_dir().join(format!("resource-router-loader-dir-{}", std::process::id()));
        tokio::fs::create_dir_all(dir.join("packages.json")).await.unwrap();
        tokio::fs::write(dir.join("models.json"), MODELS).await.unwrap();

        let err = load_from_dir(&dir).await.unwrap_err();
        assert!(matches!(err, ConfigError::Load(ref m) if m.contains("packages.json")));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn missing_models_file_is_a_load_error() {
        let dir = std::env::temp_dir().join("resource-router-loader-missing");
        let err = load_from_dir(&dir).await.unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
