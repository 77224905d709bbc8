//! Catalog reference resolution.
//!
//! Yarns, needles and hooks are managed on their own; a project only stores
//! their ids. The summaries here are the fields copied into a project view
//! when a usage item's reference is expanded.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::enums::NeedleType;
use crate::error::CoreError;
use crate::types::DocId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YarnSummary {
    pub id: DocId,
    pub name: String,
    pub brand: Option<String>,
    pub yarn_type: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedleSummary {
    pub id: DocId,
    pub size_mm: f64,
    pub size_us: Option<String>,
    pub needle_type: NeedleType,
    pub material: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookSummary {
    pub id: DocId,
    pub size_mm: f64,
    pub size_us: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
}

/// Read access to catalog summaries, keyed by id.
///
/// Ids with no catalog entry are simply absent from the returned map.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn yarn_summaries(&self, ids: &[DocId])
        -> Result<HashMap<DocId, YarnSummary>, CoreError>;

    async fn needle_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, NeedleSummary>, CoreError>;

    async fn hook_summaries(&self, ids: &[DocId])
        -> Result<HashMap<DocId, HookSummary>, CoreError>;
}

/// Fail with `NotFound` for the first id that has no summary.
pub fn require_all<S>(
    entity: &'static str,
    ids: &[DocId],
    found: &HashMap<DocId, S>,
) -> Result<(), CoreError> {
    match ids.iter().find(|id| !found.contains_key(id)) {
        Some(&id) => Err(CoreError::NotFound { entity, id }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use uuid::Uuid;

    #[test]
    fn require_all_reports_first_missing_id() {
        let present = Uuid::new_v4();
        let missing = Uuid::new_v4();
        let mut found = HashMap::new();
        found.insert(present, ());

        assert!(require_all("Yarn", &[present], &found).is_ok());
        assert_matches!(
            require_all("Yarn", &[present, missing], &found),
            Err(CoreError::NotFound { entity: "Yarn", id }) if id == missing
        );
    }
}
