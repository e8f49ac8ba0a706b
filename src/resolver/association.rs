//! Association inference: which association on a parent leads to a target type.
//!
//! Candidates come from the target's literal type name only. A subtype stored through its
//! supertype's association (single-table inheritance) is not inferred; callers pass the
//! association name explicitly for those.

use crate::config::ModelCatalog;
use crate::error::ResolveError;
use crate::inflect::ModelName;
use crate::resolver::ResourceTarget;

use super::Record;

/// Candidate association names for a target type, in priority order:
/// the namespaced plural, then the demodulized plural when it differs.
pub fn candidates(name: &ModelName) -> Vec<String> {
    let mut out = vec![name.plural.clone()];
    let demodulized = name.demodulized_plural();
    if !out.contains(&demodulized) {
        out.push(demodulized);
    }
    out
}

/// Name of the single association on `parent`'s model connecting it to `target`.
/// A route symbol is returned as is.
pub fn resolve_association(
    catalog: &ModelCatalog,
    target: &ResourceTarget<'_>,
    parent: &Record,
) -> Result<String, ResolveError> {
    let target_type = match target {
        ResourceTarget::Route(name) => return Ok((*name).to_string()),
        ResourceTarget::Model(name) => *name,
        ResourceTarget::Record(record) => record.model.as_str(),
        ResourceTarget::None => {
            return Err(ResolveError::InvalidTarget(
                "an empty target has no association; pass one explicitly".into(),
            ))
        }
    };
    let target_info = catalog
        .get(target_type)
        .ok_or_else(|| ResolveError::UnknownModel(target_type.to_string()))?;
    let parent_info = catalog
        .get(&parent.model)
        .ok_or_else(|| ResolveError::UnknownModel(parent.model.clone()))?;

    let tried = candidates(&target_info.model_name);
    let matches: Vec<String> = tried
        .iter()
        .filter(|candidate| {
            parent_info
                .association(candidate)
                .is_some_and(|a| catalog.is_a(target_type, &a.target))
        })
        .cloned()
        .collect();

    match matches.len() {
        0 => Err(ResolveError::AssociationNotFound {
            target: target_type.to_string(),
            parent: parent.model.clone(),
            candidates: tried,
        }),
        1 => Ok(matches.into_iter().next().unwrap_or_default()),
        _ => Err(ResolveError::AmbiguousAssociation {
            target: target_type.to_string(),
            parent: parent.model.clone(),
            matches,
        }),
    }
}
