//! Gauge swatch model and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use stashbook_core::catalog::{HookSummary, NeedleSummary, YarnSummary};
use stashbook_core::enums::GaugeType;
use stashbook_core::error::CoreError;
use stashbook_core::gauge::{check_tool_exclusivity, GaugeMetrics};
use stashbook_core::query_filter::FilterParams;
use stashbook_core::types::{DocId, Timestamp};
use stashbook_core::validation::{empty_patch, validate_input};
use validator::Validate;

use crate::models::all_none;
use crate::models::photo::CatalogPhoto;
use crate::models::project::ProjectSummary;

/// A row from the `gauges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gauge {
    pub id: DocId,
    pub project_id: DocId,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub gauge_type: GaugeType,
    pub comments: Option<String>,
    pub yarn_id: Option<DocId>,
    pub needle_id: Option<DocId>,
    pub hook_id: Option<DocId>,
    pub stitches: f64,
    pub rows: f64,
    pub width_cm: f64,
    pub height_cm: f64,
    pub photos: Json<Vec<CatalogPhoto>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A gauge together with its derived densities and expanded references.
///
/// A reference whose target no longer exists expands to `null`; the raw id
/// stays in the flattened gauge fields.
#[derive(Debug, Clone, Serialize)]
pub struct GaugeView {
    #[serde(flatten)]
    pub gauge: Gauge,
    #[serde(flatten)]
    pub metrics: GaugeMetrics,
    pub project: Option<ProjectSummary>,
    pub yarn: Option<YarnSummary>,
    pub needle: Option<NeedleSummary>,
    pub hook: Option<HookSummary>,
}

impl GaugeView {
    pub fn expand(gauge: Gauge, refs: &GaugeReferences) -> Self {
        let mut view = Self::from(gauge);
        view.project = refs.projects.get(&view.gauge.project_id).cloned();
        view.yarn = view.gauge.yarn_id.and_then(|id| refs.yarns.get(&id).cloned());
        view.needle = view.gauge.needle_id.and_then(|id| refs.needles.get(&id).cloned());
        view.hook = view.gauge.hook_id.and_then(|id| refs.hooks.get(&id).cloned());
        view
    }
}

/// Metrics only; every reference left unexpanded.
impl From<Gauge> for GaugeView {
    fn from(gauge: Gauge) -> Self {
        let metrics =
            GaugeMetrics::compute(gauge.stitches, gauge.rows, gauge.width_cm, gauge.height_cm);
        Self {
            gauge,
            metrics,
            project: None,
            yarn: None,
            needle: None,
            hook: None,
        }
    }
}

/// Targets of a batch of gauges' references, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct GaugeReferences {
    pub projects: HashMap<DocId, ProjectSummary>,
    pub yarns: HashMap<DocId, YarnSummary>,
    pub needles: HashMap<DocId, NeedleSummary>,
    pub hooks: HashMap<DocId, HookSummary>,
}

/// Distinct ids referenced by a batch of gauges, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaugeReferenceIds {
    pub projects: Vec<DocId>,
    pub yarns: Vec<DocId>,
    pub needles: Vec<DocId>,
    pub hooks: Vec<DocId>,
}

impl GaugeReferenceIds {
    pub fn collect<'a>(gauges: impl IntoIterator<Item = &'a Gauge>) -> Self {
        fn push(ids: &mut Vec<DocId>, id: Option<DocId>) {
            if let Some(id) = id {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }

        let mut ids = Self::default();
        for gauge in gauges {
            push(&mut ids.projects, Some(gauge.project_id));
            push(&mut ids.yarns, gauge.yarn_id);
            push(&mut ids.needles, gauge.needle_id);
            push(&mut ids.hooks, gauge.hook_id);
        }
        ids
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGauge {
    pub project_id: DocId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub gauge_type: GaugeType,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
    pub yarn_id: Option<DocId>,
    pub needle_id: Option<DocId>,
    pub hook_id: Option<DocId>,
    #[validate(range(min = 0.0))]
    pub stitches: f64,
    #[validate(range(min = 0.0))]
    pub rows: f64,
    #[validate(range(min = 0.0))]
    pub width_cm: f64,
    #[validate(range(min = 0.0))]
    pub height_cm: f64,
}

impl CreateGauge {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        self.name = self.name.trim().to_string();
        validate_input(&*self)?;
        check_tool_exclusivity(self.needle_id, self.hook_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateGauge {
    pub project_id: Option<DocId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub gauge_type: Option<GaugeType>,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
    pub yarn_id: Option<DocId>,
    pub needle_id: Option<DocId>,
    pub hook_id: Option<DocId>,
    #[validate(range(min = 0.0))]
    pub stitches: Option<f64>,
    #[validate(range(min = 0.0))]
    pub rows: Option<f64>,
    #[validate(range(min = 0.0))]
    pub width_cm: Option<f64>,
    #[validate(range(min = 0.0))]
    pub height_cm: Option<f64>,
}

impl UpdateGauge {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if all_none!(
            self;
            project_id, name, gauge_type, comments, yarn_id, needle_id, hook_id, stitches, rows,
            width_cm, height_cm,
        ) {
            return Err(empty_patch());
        }
        self.name = self.name.take().map(|n| n.trim().to_string());
        validate_input(&*self)?;
        check_tool_exclusivity(self.needle_id, self.hook_id)
    }

    /// Tool exclusivity against the stored gauge the patch will merge into.
    pub fn check_against(&self, current: &Gauge) -> Result<(), CoreError> {
        check_tool_exclusivity(
            self.needle_id.or(current.needle_id),
            self.hook_id.or(current.hook_id),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaugeFilter {
    pub project_id: Option<DocId>,
    pub gauge_type: Option<GaugeType>,
}

impl GaugeFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            project_id: values.id("project")?,
            gauge_type: values.parse("gauge_type")?,
        };
        values.finish()?;
        Ok(filter)
    }
}
