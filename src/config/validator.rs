//! Config validation: referential integrity and package consistency.

use crate::config::FullConfig;
use crate::error::ConfigError;
use crate::inflect::is_type_path;
use std::collections::{HashMap, HashSet};

/// Route-safe identifier: lowercase snake_case starting with a letter.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn check_mount_path(name: &str, mount_path: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPackage {
        name: name.to_string(),
        reason: format!("mount path '{}' {}", mount_path, reason),
    };
    if !mount_path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if mount_path == "/" {
        return Ok(());
    }
    if mount_path.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }
    for segment in mount_path[1..].split('/') {
        if segment.is_empty() || segment.starts_with(':') || segment.contains('*') {
            return Err(invalid("must be made of static segments"));
        }
    }
    Ok(())
}

pub fn validate(config: &FullConfig) -> Result<(), ConfigError> {
    let mut model_names = HashSet::new();
    for m in &config.models {
        if !is_type_path(&m.name) {
            return Err(ConfigError::Validation(format!("model name '{}' is not a type path", m.name)));
        }
        if !model_names.insert(m.name.as_str()) {
            return Err(ConfigError::Validation(format!("duplicate model: {}", m.name)));
        }
    }

    for m in &config.models {
        for s in &m.supertypes {
            if !model_names.contains(s.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "supertype",
                    id: format!("{} < {}", m.name, s),
                });
            }
        }
        let mut association_names = HashSet::new();
        for a in &m.associations {
            if !is_identifier(&a.name) {
                return Err(ConfigError::Validation(format!(
                    "association '{}' on {} is not an identifier",
                    a.name, m.name
                )));
            }
            if !association_names.insert(a.name.as_str()) {
                return Err(ConfigError::Validation(format!("duplicate association {} on {}", a.name, m.name)));
            }
            if !model_names.contains(a.target.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "association target",
                    id: format!("{}.{} -> {}", m.name, a.name, a.target),
                });
            }
        }
    }

    let mut package_names = HashSet::new();
    let mut mount_paths: HashMap<&str, &str> = HashMap::new();
    for p in &config.packages {
        if !is_identifier(&p.name) {
            return Err(ConfigError::InvalidPackage {
                name: p.name.clone(),
                reason: "name must be a snake_case identifier".into(),
            });
        }
        if !package_names.insert(p.name.as_str()) {
            return Err(ConfigError::DuplicatePackage(p.name.clone()));
        }
        check_mount_path(&p.name, &p.mount_path)?;
        if let Some(other) = mount_paths.insert(p.mount_path.as_str(), p.name.as_str()) {
            return Err(ConfigError::InvalidPackage {
                name: p.name.clone(),
                reason: format!("mount path '{}' already used by {}", p.mount_path, other),
            });
        }
        if let Some(param) = &p.scope_param {
            if !is_identifier(param) {
                return Err(ConfigError::InvalidPackage {
                    name: p.name.clone(),
                    reason: format!("scope param '{}' is not an identifier", param),
                });
            }
        }
    }

    Ok(())
}
