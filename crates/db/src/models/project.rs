//! Row shape of the `projects` table.
//!
//! The embedded collections are JSONB columns decoded straight into the
//! domain records, so a row converts into a [`Project`] without loss.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use stashbook_core::enums::{ProjectStatus, ProjectType};
use stashbook_core::project::{AdditionalCost, HookUsage, NeedleUsage, Photo, Project, YarnUsage};
use stashbook_core::types::{Date, DocId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DocId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub comments: Option<String>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub photos: Json<Vec<Photo>>,
    pub yarns_used: Json<Vec<YarnUsage>>,
    pub needles_used: Json<Vec<NeedleUsage>>,
    pub hooks_used: Json<Vec<HookUsage>>,
    pub additional_costs: Json<Vec<AdditionalCost>>,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identifying fields of a project, embedded where another record points at it.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ProjectSummary {
    pub id: DocId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            project_type: row.project_type,
            status: row.status,
            comments: row.comments,
            start_date: row.start_date,
            completion_date: row.completion_date,
            photos: row.photos.0,
            yarns_used: row.yarns_used.0,
            needles_used: row.needles_used.0,
            hooks_used: row.hooks_used.0,
            additional_costs: row.additional_costs.0,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
