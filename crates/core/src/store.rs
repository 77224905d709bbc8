//! Persistence seam for project documents.
//!
//! A store keeps whole [`Project`] documents, embedded collections included.
//! Writes after creation are conditional on the document's `version`, which
//! is how concurrent read-modify-write cycles detect each other.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::enums::{ProjectStatus, ProjectType};
use crate::error::CoreError;
use crate::pagination::PageRequest;
use crate::project::Project;
use crate::query_filter::FilterParams;
use crate::types::DocId;

/// Supported filters for project listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
    pub project_type: Option<ProjectType>,
}

impl ProjectFilter {
    /// Build from raw query parameters. Unknown keys are rejected.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            status: values.parse("status")?,
            project_type: values.parse("project_type")?,
        };
        values.finish()?;
        Ok(filter)
    }

    pub fn matches(&self, project: &Project) -> bool {
        self.status.map_or(true, |s| project.status == s)
            && self.project_type.map_or(true, |t| project.project_type == t)
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Persist a new document as given.
    async fn insert(&self, project: &Project) -> Result<(), CoreError>;

    async fn find(&self, id: DocId) -> Result<Option<Project>, CoreError>;

    /// Overwrite the stored document if its version is still
    /// `expected_version`, returning the document as stored (version bumped).
    ///
    /// Fails with `NotFound` when the document is gone and with
    /// `ConcurrentModification` when the version moved on.
    async fn replace(&self, project: &Project, expected_version: i64)
        -> Result<Project, CoreError>;

    /// Hard delete. Returns whether a document was removed.
    async fn delete(&self, id: DocId) -> Result<bool, CoreError>;

    /// One page of matching documents, most recently updated first, plus the
    /// total number of matches.
    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), CoreError>;
}
