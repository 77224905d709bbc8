//! In-memory implementations of [`ProjectStore`] and [`CatalogLookup`].
//!
//! Backs the engine's unit tests. The version check in
//! [`MemoryProjectStore::replace`] behaves like the Postgres store's
//! conditional update.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{CatalogLookup, HookSummary, NeedleSummary, YarnSummary};
use crate::error::CoreError;
use crate::pagination::PageRequest;
use crate::project::Project;
use crate::store::{ProjectFilter, ProjectStore};
use crate::types::DocId;

#[derive(Debug, Default, Clone)]
pub struct MemoryProjectStore {
    projects: Arc<RwLock<HashMap<DocId, Project>>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn insert(&self, project: &Project) -> Result<(), CoreError> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(CoreError::Conflict(format!(
                "Project {} already exists",
                project.id
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn find(&self, id: DocId) -> Result<Option<Project>, CoreError> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn replace(
        &self,
        project: &Project,
        expected_version: i64,
    ) -> Result<Project, CoreError> {
        let mut projects = self.projects.write().await;
        let stored = projects.get_mut(&project.id).ok_or(CoreError::NotFound {
            entity: "Project",
            id: project.id,
        })?;
        if stored.version != expected_version {
            return Err(CoreError::ConcurrentModification {
                entity: "Project",
                id: project.id,
            });
        }
        let mut next = project.clone();
        next.version = expected_version + 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: DocId) -> Result<bool, CoreError> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), CoreError> {
        let projects = self.projects.read().await;
        let mut matching: Vec<Project> = projects
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit as usize)
            .collect();
        Ok((data, total))
    }
}

/// Catalog summaries held in maps.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    yarns: Arc<RwLock<HashMap<DocId, YarnSummary>>>,
    needles: Arc<RwLock<HashMap<DocId, NeedleSummary>>>,
    hooks: Arc<RwLock<HashMap<DocId, HookSummary>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_yarn(&self, yarn: YarnSummary) {
        self.yarns.write().await.insert(yarn.id, yarn);
    }

    pub async fn insert_needle(&self, needle: NeedleSummary) {
        self.needles.write().await.insert(needle.id, needle);
    }

    pub async fn insert_hook(&self, hook: HookSummary) {
        self.hooks.write().await.insert(hook.id, hook);
    }
}

fn pick<S: Clone>(source: &HashMap<DocId, S>, ids: &[DocId]) -> HashMap<DocId, S> {
    ids.iter()
        .filter_map(|id| source.get(id).map(|s| (*id, s.clone())))
        .collect()
}

#[async_trait]
impl CatalogLookup for MemoryCatalog {
    async fn yarn_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, YarnSummary>, CoreError> {
        Ok(pick(&*self.yarns.read().await, ids))
    }

    async fn needle_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, NeedleSummary>, CoreError> {
        Ok(pick(&*self.needles.read().await, ids))
    }

    async fn hook_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, HookSummary>, CoreError> {
        Ok(pick(&*self.hooks.read().await, ids))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ProjectType;
    use crate::project::CreateProject;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn project(name: &str) -> Project {
        Project::create(CreateProject::new(name, ProjectType::Knitting), Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn replace_bumps_version() {
        let store = MemoryProjectStore::new();
        let mut p = project("Hat");
        store.insert(&p).await.unwrap();

        p.name = "Beanie".into();
        let stored = store.replace(&p, 1).await.unwrap();
        assert_eq!(stored.version, 2);
        assert_eq!(store.find(p.id).await.unwrap().unwrap().name, "Beanie");
    }

    #[tokio::test]
    async fn replace_with_stale_version_conflicts() {
        let store = MemoryProjectStore::new();
        let p = project("Hat");
        store.insert(&p).await.unwrap();
        store.replace(&p, 1).await.unwrap();

        assert_matches!(
            store.replace(&p, 1).await,
            Err(CoreError::ConcurrentModification { entity: "Project", .. })
        );
    }

    #[tokio::test]
    async fn replace_missing_document_is_not_found() {
        let store = MemoryProjectStore::new();
        assert_matches!(
            store.replace(&project("Ghost"), 1).await,
            Err(CoreError::NotFound { entity: "Project", .. })
        );
    }

    #[tokio::test]
    async fn catalog_returns_only_known_ids() {
        let catalog = MemoryCatalog::new();
        let id = uuid::Uuid::new_v4();
        catalog
            .insert_hook(HookSummary {
                id,
                size_mm: 4.0,
                size_us: Some("G-6".into()),
                material: None,
                brand: None,
            })
            .await;

        let found = catalog
            .hook_summaries(&[id, uuid::Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&id));
    }
}
