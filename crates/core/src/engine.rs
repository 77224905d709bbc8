//! Project aggregate engine.
//!
//! [`ProjectEngine`] is the only component that writes project documents.
//! Every mutation after creation is a load-mutate-replace cycle guarded by
//! the document version; a cycle that loses a race is repeated from a fresh
//! load, up to [`MAX_WRITE_ATTEMPTS`] times.

use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog::{require_all, CatalogLookup, YarnSummary};
use crate::error::CoreError;
use crate::pagination::{PageRequest, Paginated};
use crate::project::{
    CostSummary, CreateProject, NewCost, NewHookUsage, NewNeedleUsage, NewPhoto, NewYarnUsage,
    Project, ProjectView, ReferencedIds, ResolvedReferences, ToolUsagePatch, UpdateProject,
    UpdateProjectStatus, YarnUsagePatch,
};
use crate::store::{ProjectFilter, ProjectStore};
use crate::types::{now, DocId};

/// Attempts per read-modify-write cycle before a version conflict surfaces.
pub const MAX_WRITE_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct ProjectEngine {
    store: Arc<dyn ProjectStore>,
    catalog: Arc<dyn CatalogLookup>,
}

impl ProjectEngine {
    pub fn new(store: Arc<dyn ProjectStore>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { store, catalog }
    }

    // -----------------------------------------------------------------------
    // Project lifecycle
    // -----------------------------------------------------------------------

    /// Create a project, with any initial usage items.
    ///
    /// Shape and collection rules are checked first, then every referenced
    /// catalog id must exist. Nothing is stored unless all checks pass.
    pub async fn create(&self, input: CreateProject) -> Result<ProjectView, CoreError> {
        let project = Project::create(input, now())?;
        self.ensure_references(&ReferencedIds::collect([&project]))
            .await?;
        self.store.insert(&project).await?;

        tracing::info!(
            project_id = %project.id,
            yarns = project.yarns_used.len(),
            needles = project.needles_used.len(),
            hooks = project.hooks_used.len(),
            "Project created",
        );
        self.expand_one(project).await
    }

    pub async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<Paginated<ProjectView>, CoreError> {
        let (projects, total) = self.store.list(filter, page).await?;
        let views = self.expand_many(projects).await?;
        Ok(Paginated::new(views, page, total))
    }

    pub async fn get(&self, id: DocId) -> Result<ProjectView, CoreError> {
        let project = self.load(id).await?;
        self.expand_one(project).await
    }

    /// Scalar update. Usage collections are only reachable through their
    /// dedicated operations.
    pub async fn update(&self, id: DocId, patch: UpdateProject) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.apply_update(patch.clone()))
            .await?;
        tracing::info!(project_id = %id, version = project.version, "Project updated");
        self.expand_one(project).await
    }

    pub async fn update_status(
        &self,
        id: DocId,
        change: UpdateProjectStatus,
    ) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| {
                project.apply_status(change.clone());
                Ok(())
            })
            .await?;
        tracing::info!(project_id = %id, status = %project.status, "Project status changed");
        self.expand_one(project).await
    }

    /// Hard delete. Catalog entries and gauges are left alone.
    pub async fn delete(&self, id: DocId) -> Result<(), CoreError> {
        if !self.store.delete(id).await? {
            return Err(project_not_found(id));
        }
        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Photos and additional costs
    // -----------------------------------------------------------------------

    pub async fn add_photo(&self, id: DocId, input: NewPhoto) -> Result<ProjectView, CoreError> {
        let (project, photo_id) = self
            .mutate(id, |project| project.add_photo(input.clone(), now()))
            .await?;
        tracing::debug!(project_id = %id, photo_id = %photo_id, "Photo added");
        self.expand_one(project).await
    }

    pub async fn add_cost(&self, id: DocId, input: NewCost) -> Result<ProjectView, CoreError> {
        let (project, cost_id) = self
            .mutate(id, |project| project.add_cost(input.clone(), now()))
            .await?;
        tracing::debug!(project_id = %id, cost_id = %cost_id, "Additional cost added");
        self.expand_one(project).await
    }

    // -----------------------------------------------------------------------
    // Yarn usage
    // -----------------------------------------------------------------------

    pub async fn add_yarn(&self, id: DocId, input: NewYarnUsage) -> Result<ProjectView, CoreError> {
        self.load(id).await?;
        let found = self.catalog.yarn_summaries(&[input.yarn_id]).await?;
        require_all("Yarn", &[input.yarn_id], &found)?;

        let (project, usage_id) = self
            .mutate(id, |project| project.add_yarn(input.clone()))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, yarn_id = %input.yarn_id, "Yarn added to project");
        self.expand_one(project).await
    }

    pub async fn update_yarn(
        &self,
        id: DocId,
        usage_id: DocId,
        patch: YarnUsagePatch,
    ) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.update_yarn(usage_id, patch.clone()))
            .await?;
        tracing::debug!(project_id = %id, usage_id = %usage_id, "Yarn usage updated");
        self.expand_one(project).await
    }

    pub async fn remove_yarn(&self, id: DocId, usage_id: DocId) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.remove_yarn(usage_id))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, "Yarn removed from project");
        self.expand_one(project).await
    }

    // -----------------------------------------------------------------------
    // Needle usage
    // -----------------------------------------------------------------------

    pub async fn add_needle(
        &self,
        id: DocId,
        input: NewNeedleUsage,
    ) -> Result<ProjectView, CoreError> {
        self.load(id).await?;
        let found = self.catalog.needle_summaries(&[input.needle_id]).await?;
        require_all("Needle", &[input.needle_id], &found)?;

        let (project, usage_id) = self
            .mutate(id, |project| project.add_needle(input.clone()))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, needle_id = %input.needle_id, "Needle added to project");
        self.expand_one(project).await
    }

    pub async fn update_needle(
        &self,
        id: DocId,
        usage_id: DocId,
        patch: ToolUsagePatch,
    ) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.update_needle(usage_id, patch.clone()))
            .await?;
        tracing::debug!(project_id = %id, usage_id = %usage_id, "Needle usage updated");
        self.expand_one(project).await
    }

    pub async fn remove_needle(
        &self,
        id: DocId,
        usage_id: DocId,
    ) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.remove_needle(usage_id))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, "Needle removed from project");
        self.expand_one(project).await
    }

    // -----------------------------------------------------------------------
    // Hook usage
    // -----------------------------------------------------------------------

    pub async fn add_hook(&self, id: DocId, input: NewHookUsage) -> Result<ProjectView, CoreError> {
        self.load(id).await?;
        let found = self.catalog.hook_summaries(&[input.hook_id]).await?;
        require_all("Hook", &[input.hook_id], &found)?;

        let (project, usage_id) = self
            .mutate(id, |project| project.add_hook(input.clone()))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, hook_id = %input.hook_id, "Hook added to project");
        self.expand_one(project).await
    }

    pub async fn update_hook(
        &self,
        id: DocId,
        usage_id: DocId,
        patch: ToolUsagePatch,
    ) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.update_hook(usage_id, patch.clone()))
            .await?;
        tracing::debug!(project_id = %id, usage_id = %usage_id, "Hook usage updated");
        self.expand_one(project).await
    }

    pub async fn remove_hook(&self, id: DocId, usage_id: DocId) -> Result<ProjectView, CoreError> {
        let (project, ()) = self
            .mutate(id, |project| project.remove_hook(usage_id))
            .await?;
        tracing::info!(project_id = %id, usage_id = %usage_id, "Hook removed from project");
        self.expand_one(project).await
    }

    // -----------------------------------------------------------------------
    // Cost summary
    // -----------------------------------------------------------------------

    pub async fn cost_summary(&self, id: DocId) -> Result<CostSummary, CoreError> {
        let project = self.load(id).await?;
        let ids: Vec<DocId> = project.yarns_used.iter().map(|u| u.yarn_id).collect();
        let yarns = self.yarn_names(&ids).await?;
        Ok(CostSummary::compute(&project, &yarns))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    async fn load(&self, id: DocId) -> Result<Project, CoreError> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| project_not_found(id))
    }

    /// Run one read-modify-write cycle, repeating it on a version conflict.
    ///
    /// `op` sees a freshly loaded document on every attempt and must leave it
    /// untouched when it returns an error.
    async fn mutate<T, F>(&self, id: DocId, mut op: F) -> Result<(Project, T), CoreError>
    where
        F: FnMut(&mut Project) -> Result<T, CoreError> + Send,
        T: Send,
    {
        let mut attempt = 1;
        loop {
            let mut project = self.load(id).await?;
            let expected_version = project.version;
            let outcome = op(&mut project)?;
            project.updated_at = now();

            match self.store.replace(&project, expected_version).await {
                Ok(stored) => return Ok((stored, outcome)),
                Err(err) if err.is_retryable() && attempt < MAX_WRITE_ATTEMPTS => {
                    tracing::warn!(
                        project_id = %id,
                        attempt,
                        expected_version,
                        "Project changed during update, retrying",
                    );
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Fail with `NotFound` naming the first missing catalog entity.
    async fn ensure_references(&self, ids: &ReferencedIds) -> Result<(), CoreError> {
        let resolved = self.resolve(ids).await?;
        require_all("Yarn", &ids.yarns, &resolved.yarns)?;
        require_all("Needle", &ids.needles, &resolved.needles)?;
        require_all("Hook", &ids.hooks, &resolved.hooks)?;
        Ok(())
    }

    async fn resolve(&self, ids: &ReferencedIds) -> Result<ResolvedReferences, CoreError> {
        let mut resolved = ResolvedReferences::default();
        if !ids.yarns.is_empty() {
            resolved.yarns = self.catalog.yarn_summaries(&ids.yarns).await?;
        }
        if !ids.needles.is_empty() {
            resolved.needles = self.catalog.needle_summaries(&ids.needles).await?;
        }
        if !ids.hooks.is_empty() {
            resolved.hooks = self.catalog.hook_summaries(&ids.hooks).await?;
        }
        Ok(resolved)
    }

    async fn yarn_names(&self, ids: &[DocId]) -> Result<HashMap<DocId, YarnSummary>, CoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.catalog.yarn_summaries(ids).await
    }

    async fn expand_one(&self, project: Project) -> Result<ProjectView, CoreError> {
        let refs = self.resolve(&ReferencedIds::collect([&project])).await?;
        Ok(ProjectView::expand(project, &refs))
    }

    async fn expand_many(&self, projects: Vec<Project>) -> Result<Vec<ProjectView>, CoreError> {
        let refs = self.resolve(&ReferencedIds::collect(&projects)).await?;
        Ok(projects
            .into_iter()
            .map(|project| ProjectView::expand(project, &refs))
            .collect())
    }
}

fn project_not_found(id: DocId) -> CoreError {
    CoreError::NotFound {
        entity: "Project",
        id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
