//! Read model returned to clients: the document with usage references
//! expanded to catalog summaries and the derived cost totals filled in.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::catalog::{HookSummary, NeedleSummary, YarnSummary};
use crate::enums::{ProjectStatus, ProjectType};
use crate::project::document::{
    AdditionalCost, HookUsage, NeedleUsage, Photo, Project, YarnUsage,
};
use crate::types::{Date, DocId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YarnUsageView {
    #[serde(flatten)]
    pub usage: YarnUsage,
    /// `None` when the catalog entry no longer exists.
    pub yarn: Option<YarnSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeedleUsageView {
    #[serde(flatten)]
    pub usage: NeedleUsage,
    pub needle: Option<NeedleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HookUsageView {
    #[serde(flatten)]
    pub usage: HookUsage,
    pub hook: Option<HookSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub id: DocId,
    pub name: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub comments: Option<String>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub photos: Vec<Photo>,
    pub yarns_used: Vec<YarnUsageView>,
    pub needles_used: Vec<NeedleUsageView>,
    pub hooks_used: Vec<HookUsageView>,
    pub additional_costs: Vec<AdditionalCost>,
    pub total_yarn_cost: f64,
    pub total_additional_cost: f64,
    pub total_project_cost: f64,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Catalog ids referenced by one or more projects, deduplicated.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReferencedIds {
    pub yarns: Vec<DocId>,
    pub needles: Vec<DocId>,
    pub hooks: Vec<DocId>,
}

impl ReferencedIds {
    pub fn collect<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Self {
        let mut yarns = BTreeSet::new();
        let mut needles = BTreeSet::new();
        let mut hooks = BTreeSet::new();
        for project in projects {
            yarns.extend(project.yarns_used.iter().map(|u| u.yarn_id));
            needles.extend(project.needles_used.iter().map(|u| u.needle_id));
            hooks.extend(project.hooks_used.iter().map(|u| u.hook_id));
        }
        Self {
            yarns: yarns.into_iter().collect(),
            needles: needles.into_iter().collect(),
            hooks: hooks.into_iter().collect(),
        }
    }
}

/// Catalog summaries resolved for a batch of projects.
#[derive(Debug, Default, Clone)]
pub struct ResolvedReferences {
    pub yarns: HashMap<DocId, YarnSummary>,
    pub needles: HashMap<DocId, NeedleSummary>,
    pub hooks: HashMap<DocId, HookSummary>,
}

impl ProjectView {
    pub fn expand(project: Project, refs: &ResolvedReferences) -> Self {
        let total_yarn_cost = project.total_yarn_cost();
        let total_additional_cost = project.total_additional_cost();

        Self {
            id: project.id,
            name: project.name,
            project_type: project.project_type,
            status: project.status,
            comments: project.comments,
            start_date: project.start_date,
            completion_date: project.completion_date,
            photos: project.photos,
            yarns_used: project
                .yarns_used
                .into_iter()
                .map(|usage| YarnUsageView {
                    yarn: refs.yarns.get(&usage.yarn_id).cloned(),
                    usage,
                })
                .collect(),
            needles_used: project
                .needles_used
                .into_iter()
                .map(|usage| NeedleUsageView {
                    needle: refs.needles.get(&usage.needle_id).cloned(),
                    usage,
                })
                .collect(),
            hooks_used: project
                .hooks_used
                .into_iter()
                .map(|usage| HookUsageView {
                    hook: refs.hooks.get(&usage.hook_id).cloned(),
                    usage,
                })
                .collect(),
            additional_costs: project.additional_costs,
            total_yarn_cost,
            total_additional_cost,
            total_project_cost: total_yarn_cost + total_additional_cost,
            version: project.version,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
