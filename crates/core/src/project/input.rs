//! Request DTOs for project operations.
//!
//! Shape rules (lengths, ranges) are declared with `validator`; enum
//! membership is enforced by deserialization. Patches reject unknown fields,
//! so usage collections cannot be smuggled through a scalar update.

use serde::Deserialize;
use validator::Validate;

use crate::enums::{CostCategory, PhotoType, ProjectStatus, ProjectType, QuantityUnit};
use crate::types::{Date, DocId, Timestamp};

/// DTO for creating a project, optionally with initial usage items.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
    pub project_type: ProjectType,
    /// Defaults to `active` if omitted.
    pub status: Option<ProjectStatus>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    #[serde(default)]
    #[validate(nested)]
    pub yarns_used: Vec<NewYarnUsage>,
    #[serde(default)]
    #[validate(nested)]
    pub needles_used: Vec<NewNeedleUsage>,
    #[serde(default)]
    #[validate(nested)]
    pub hooks_used: Vec<NewHookUsage>,
}

impl CreateProject {
    /// Minimal input: a name and a craft.
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            name: name.into(),
            comments: None,
            project_type,
            status: None,
            start_date: None,
            completion_date: None,
            yarns_used: Vec::new(),
            needles_used: Vec::new(),
            hooks_used: Vec::new(),
        }
    }
}

/// DTO for a scalar project update. All fields are optional, at least one
/// must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProject {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub comments: Option<String>,
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
}

impl UpdateProject {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.comments.is_none()
            && self.project_type.is_none()
            && self.status.is_none()
            && self.start_date.is_none()
            && self.completion_date.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProjectStatus {
    pub status: ProjectStatus,
    /// Only applied when `status` is `completed`.
    pub completion_date: Option<Date>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPhoto {
    #[validate(length(min = 1))]
    pub file_path: String,
    #[serde(default)]
    pub is_primary: bool,
    pub photo_type: Option<PhotoType>,
    #[validate(length(max = 500))]
    pub caption: Option<String>,
    pub taken_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCost {
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    /// Three-letter code, defaults to EUR.
    pub currency: Option<String>,
    pub category: Option<CostCategory>,
    pub purchase_date: Option<Date>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewYarnUsage {
    pub yarn_id: DocId,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity_used: f64,
    #[serde(default)]
    pub quantity_unit: QuantityUnit,
    #[validate(range(min = 0.0))]
    pub cost_per_unit: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl NewYarnUsage {
    pub fn new(yarn_id: DocId, quantity_used: f64) -> Self {
        Self {
            yarn_id,
            quantity_used,
            quantity_unit: QuantityUnit::default(),
            cost_per_unit: None,
            currency: None,
            notes: None,
            is_primary: false,
        }
    }
}

/// Patch for a yarn usage item. The primary flag is not patchable here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct YarnUsagePatch {
    #[validate(range(exclusive_min = 0.0))]
    pub quantity_used: Option<f64>,
    pub quantity_unit: Option<QuantityUnit>,
    #[validate(range(min = 0.0))]
    pub cost_per_unit: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl YarnUsagePatch {
    pub fn is_empty(&self) -> bool {
        self.quantity_used.is_none()
            && self.quantity_unit.is_none()
            && self.cost_per_unit.is_none()
            && self.currency.is_none()
            && self.notes.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewNeedleUsage {
    pub needle_id: DocId,
    #[serde(default)]
    pub is_primary: bool,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewHookUsage {
    pub hook_id: DocId,
    #[serde(default)]
    pub is_primary: bool,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Patch for a needle or hook usage item.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ToolUsagePatch {
    pub is_primary: Option<bool>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl ToolUsagePatch {
    pub fn is_empty(&self) -> bool {
        self.is_primary.is_none() && self.notes.is_none()
    }
}
