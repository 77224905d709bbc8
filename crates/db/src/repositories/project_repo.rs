//! Repository for the `projects` table.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::PageRequest;
use stashbook_core::project::Project;
use stashbook_core::store::{ProjectFilter, ProjectStore};
use stashbook_core::types::DocId;

use crate::models::project::{ProjectRow, ProjectSummary};
use crate::repositories::internal;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, project_type, status, comments, start_date, completion_date, \
     photos, yarns_used, needles_used, hooks_used, additional_costs, \
     version, created_at, updated_at";

/// Filter clause shared by the list and count queries.
const FILTER: &str = "($1::text IS NULL OR status = $1) AND ($2::text IS NULL OR project_type = $2)";

/// Provides document-level operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a whole document as given.
    pub async fn insert(pool: &PgPool, project: &Project) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO projects (id, name, project_type, status, comments, start_date,
                 completion_date, photos, yarns_used, needles_used, hooks_used,
                 additional_costs, version, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(project.project_type.as_str())
        .bind(project.status.as_str())
        .bind(&project.comments)
        .bind(project.start_date)
        .bind(project.completion_date)
        .bind(Json(&project.photos))
        .bind(Json(&project.yarns_used))
        .bind(Json(&project.needles_used))
        .bind(Json(&project.hooks_used))
        .bind(Json(&project.additional_costs))
        .bind(project.version)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    pub async fn exists(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    pub async fn find_summaries(
        pool: &PgPool,
        ids: &[DocId],
    ) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectSummary>(
            "SELECT id, name, project_type, status FROM projects WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Overwrite the document if its version still equals
    /// `expected_version`, bumping the version.
    ///
    /// Returns `None` when no row matched (missing, or version moved on).
    pub async fn replace(
        pool: &PgPool,
        project: &Project,
        expected_version: i64,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = $3,
                project_type = $4,
                status = $5,
                comments = $6,
                start_date = $7,
                completion_date = $8,
                photos = $9,
                yarns_used = $10,
                needles_used = $11,
                hooks_used = $12,
                additional_costs = $13,
                updated_at = $14,
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(project.id)
            .bind(expected_version)
            .bind(&project.name)
            .bind(project.project_type.as_str())
            .bind(project.status.as_str())
            .bind(&project.comments)
            .bind(project.start_date)
            .bind(project.completion_date)
            .bind(Json(&project.photos))
            .bind(Json(&project.yarns_used))
            .bind(Json(&project.needles_used))
            .bind(Json(&project.hooks_used))
            .bind(Json(&project.additional_costs))
            .bind(project.updated_at)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Project::from))
    }

    /// Permanently delete a project. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of matching projects, most recently updated first, and the
    /// total match count.
    pub async fn list(
        pool: &PgPool,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let status = filter.status.map(|s| s.as_str());
        let project_type = filter.project_type.map(|t| t.as_str());

        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE {FILTER}
             ORDER BY updated_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(status)
            .bind(project_type)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM projects WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(status)
            .bind(project_type)
            .fetch_one(pool)
            .await?;

        Ok((rows.into_iter().map(Project::from).collect(), total))
    }
}

/// [`ProjectStore`] backed by the `projects` table.
#[derive(Debug, Clone)]
pub struct PgProjectStore {
    pool: PgPool,
}

impl PgProjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn insert(&self, project: &Project) -> Result<(), CoreError> {
        ProjectRepo::insert(&self.pool, project)
            .await
            .map_err(internal)
    }

    async fn find(&self, id: DocId) -> Result<Option<Project>, CoreError> {
        ProjectRepo::find_by_id(&self.pool, id)
            .await
            .map_err(internal)
    }

    async fn replace(
        &self,
        project: &Project,
        expected_version: i64,
    ) -> Result<Project, CoreError> {
        if let Some(stored) = ProjectRepo::replace(&self.pool, project, expected_version)
            .await
            .map_err(internal)?
        {
            return Ok(stored);
        }

        let exists = ProjectRepo::exists(&self.pool, project.id)
            .await
            .map_err(internal)?;
        Err(if exists {
            CoreError::ConcurrentModification {
                entity: "Project",
                id: project.id,
            }
        } else {
            CoreError::NotFound {
                entity: "Project",
                id: project.id,
            }
        })
    }

    async fn delete(&self, id: DocId) -> Result<bool, CoreError> {
        ProjectRepo::delete(&self.pool, id).await.map_err(internal)
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: PageRequest,
    ) -> Result<(Vec<Project>, i64), CoreError> {
        ProjectRepo::list(&self.pool, filter, page)
            .await
            .map_err(internal)
    }
}
