//! The stored project document and its embedded records.
//!
//! A [`Project`] owns its photos, usage items and additional costs outright;
//! none of them has a life outside the project. All mutation goes through
//! the methods here, each of which validates fully before changing anything,
//! so a failed call leaves the document exactly as it was.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::{CostCategory, PhotoType, ProjectStatus, ProjectType, QuantityUnit};
use crate::error::CoreError;
use crate::project::input::{
    CreateProject, NewCost, NewHookUsage, NewNeedleUsage, NewPhoto, NewYarnUsage, ToolUsagePatch,
    UpdateProject, UpdateProjectStatus, YarnUsagePatch,
};
use crate::project::usage::{self, UsageKind, UsageRecord};
use crate::types::{Date, DocId, Timestamp};
use crate::validation::{empty_patch, normalize_currency, trim_optional, validate_input};

/// Version assigned to a freshly created document.
pub const INITIAL_VERSION: i64 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: DocId,
    pub name: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub comments: Option<String>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub photos: Vec<Photo>,
    pub yarns_used: Vec<YarnUsage>,
    pub needles_used: Vec<NeedleUsage>,
    pub hooks_used: Vec<HookUsage>,
    pub additional_costs: Vec<AdditionalCost>,
    /// Optimistic-concurrency token, bumped by the store on every write.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: DocId,
    pub file_path: String,
    pub is_primary: bool,
    pub photo_type: Option<PhotoType>,
    pub caption: Option<String>,
    pub taken_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YarnUsage {
    pub id: DocId,
    pub yarn_id: DocId,
    pub quantity_used: f64,
    pub quantity_unit: QuantityUnit,
    pub cost_per_unit: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub is_primary: bool,
}

impl YarnUsage {
    /// Quantity times unit cost; a missing unit cost counts as zero.
    pub fn line_total(&self) -> f64 {
        self.quantity_used * self.cost_per_unit.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedleUsage {
    pub id: DocId,
    pub needle_id: DocId,
    pub is_primary: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookUsage {
    pub id: DocId,
    pub hook_id: DocId,
    pub is_primary: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCost {
    pub id: DocId,
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: Option<CostCategory>,
    pub purchase_date: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// UsageRecord impls
// ---------------------------------------------------------------------------

macro_rules! impl_usage_record {
    ($ty:ty, $reference:ident) => {
        impl UsageRecord for $ty {
            fn usage_id(&self) -> DocId {
                self.id
            }
            fn reference(&self) -> DocId {
                self.$reference
            }
            fn is_primary(&self) -> bool {
                self.is_primary
            }
            fn set_primary(&mut self, primary: bool) {
                self.is_primary = primary;
            }
            fn notes_mut(&mut self) -> &mut Option<String> {
                &mut self.notes
            }
        }
    };
}

impl_usage_record!(YarnUsage, yarn_id);
impl_usage_record!(NeedleUsage, needle_id);
impl_usage_record!(HookUsage, hook_id);

// ---------------------------------------------------------------------------
// Construction from input
// ---------------------------------------------------------------------------

impl YarnUsage {
    fn from_input(input: NewYarnUsage) -> Result<Self, CoreError> {
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            yarn_id: input.yarn_id,
            quantity_used: input.quantity_used,
            quantity_unit: input.quantity_unit,
            cost_per_unit: input.cost_per_unit,
            currency: normalize_currency(input.currency.as_deref())?,
            notes: input.notes,
            is_primary: input.is_primary,
        })
    }
}

impl NeedleUsage {
    fn from_input(input: NewNeedleUsage) -> Result<Self, CoreError> {
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            needle_id: input.needle_id,
            is_primary: input.is_primary,
            notes: input.notes,
        })
    }
}

impl HookUsage {
    fn from_input(input: NewHookUsage) -> Result<Self, CoreError> {
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            hook_id: input.hook_id,
            is_primary: input.is_primary,
            notes: input.notes,
        })
    }
}

impl Photo {
    fn from_input(mut input: NewPhoto, now: Timestamp) -> Result<Self, CoreError> {
        input.file_path = input.file_path.trim().to_string();
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            file_path: input.file_path,
            is_primary: input.is_primary,
            photo_type: input.photo_type,
            caption: input.caption,
            taken_at: input.taken_at,
            created_at: now,
        })
    }
}

impl AdditionalCost {
    fn from_input(mut input: NewCost, now: Timestamp) -> Result<Self, CoreError> {
        input.description = input.description.trim().to_string();
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            description: input.description,
            amount: input.amount,
            currency: normalize_currency(input.currency.as_deref())?,
            category: input.category,
            purchase_date: input.purchase_date,
            notes: input.notes,
            created_at: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

impl Project {
    /// Build a new document from creation input.
    ///
    /// Each usage kind is checked independently for duplicate references and
    /// multiple primaries; the first violation is reported and nothing is
    /// built.
    pub fn create(mut input: CreateProject, now: Timestamp) -> Result<Self, CoreError> {
        input.name = input.name.trim().to_string();
        input.comments = trim_optional(input.comments);
        validate_input(&input)?;

        if let (Some(start), Some(end)) = (input.start_date, input.completion_date) {
            if end < start {
                return Err(CoreError::Validation(
                    "Completion date cannot be before the start date".to_string(),
                ));
            }
        }

        let yarns_used = input
            .yarns_used
            .into_iter()
            .map(YarnUsage::from_input)
            .collect::<Result<Vec<_>, _>>()?;
        let needles_used = input
            .needles_used
            .into_iter()
            .map(NeedleUsage::from_input)
            .collect::<Result<Vec<_>, _>>()?;
        let hooks_used = input
            .hooks_used
            .into_iter()
            .map(HookUsage::from_input)
            .collect::<Result<Vec<_>, _>>()?;

        usage::check_collection(&yarns_used, UsageKind::Yarn)?;
        usage::check_collection(&needles_used, UsageKind::Needle)?;
        usage::check_collection(&hooks_used, UsageKind::Hook)?;

        Ok(Self {
            id: Uuid::now_v7(),
            name: input.name,
            project_type: input.project_type,
            status: input.status.unwrap_or_default(),
            comments: input.comments,
            start_date: input.start_date,
            completion_date: input.completion_date,
            photos: Vec::new(),
            yarns_used,
            needles_used,
            hooks_used,
            additional_costs: Vec::new(),
            version: INITIAL_VERSION,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a scalar patch. Usage collections are never touched.
    pub fn apply_update(&mut self, mut patch: UpdateProject) -> Result<(), CoreError> {
        if patch.is_empty() {
            return Err(empty_patch());
        }
        patch.name = patch.name.map(|n| n.trim().to_string());
        validate_input(&patch)?;

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(comments) = patch.comments {
            self.comments = Some(comments);
        }
        if let Some(project_type) = patch.project_type {
            self.project_type = project_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(completion_date) = patch.completion_date {
            self.completion_date = Some(completion_date);
        }
        Ok(())
    }

    /// Set the status; a completion date is recorded only for `completed`.
    pub fn apply_status(&mut self, change: UpdateProjectStatus) {
        self.status = change.status;
        if change.status == ProjectStatus::Completed {
            if let Some(date) = change.completion_date {
                self.completion_date = Some(date);
            }
        }
    }

    pub fn add_photo(&mut self, input: NewPhoto, now: Timestamp) -> Result<DocId, CoreError> {
        let photo = Photo::from_input(input, now)?;
        let id = photo.id;
        self.photos.push(photo);
        Ok(id)
    }

    pub fn add_cost(&mut self, input: NewCost, now: Timestamp) -> Result<DocId, CoreError> {
        let cost = AdditionalCost::from_input(input, now)?;
        let id = cost.id;
        self.additional_costs.push(cost);
        Ok(id)
    }

    // -- yarns ---------------------------------------------------------------

    pub fn add_yarn(&mut self, input: NewYarnUsage) -> Result<DocId, CoreError> {
        let item = YarnUsage::from_input(input)?;
        usage::attach(&mut self.yarns_used, item, UsageKind::Yarn)
    }

    pub fn update_yarn(&mut self, usage_id: DocId, patch: YarnUsagePatch) -> Result<(), CoreError> {
        // Existence first: an unknown id is a 404 even with an empty patch.
        usage::find_mut(&mut self.yarns_used, usage_id, UsageKind::Yarn)?;
        if patch.is_empty() {
            return Err(empty_patch());
        }
        validate_input(&patch)?;
        let currency = patch
            .currency
            .as_deref()
            .map(|c| normalize_currency(Some(c)))
            .transpose()?;

        let item = usage::find_mut(&mut self.yarns_used, usage_id, UsageKind::Yarn)?;
        if let Some(quantity) = patch.quantity_used {
            item.quantity_used = quantity;
        }
        if let Some(unit) = patch.quantity_unit {
            item.quantity_unit = unit;
        }
        if let Some(cost) = patch.cost_per_unit {
            item.cost_per_unit = Some(cost);
        }
        if let Some(currency) = currency {
            item.currency = currency;
        }
        if let Some(notes) = patch.notes {
            item.notes = Some(notes);
        }
        Ok(())
    }

    pub fn remove_yarn(&mut self, usage_id: DocId) -> Result<(), CoreError> {
        usage::detach(&mut self.yarns_used, usage_id, UsageKind::Yarn).map(|_| ())
    }

    // -- needles -------------------------------------------------------------

    pub fn add_needle(&mut self, input: NewNeedleUsage) -> Result<DocId, CoreError> {
        let item = NeedleUsage::from_input(input)?;
        usage::attach(&mut self.needles_used, item, UsageKind::Needle)
    }

    pub fn update_needle(
        &mut self,
        usage_id: DocId,
        patch: ToolUsagePatch,
    ) -> Result<(), CoreError> {
        apply_tool_patch(&mut self.needles_used, usage_id, patch, UsageKind::Needle)
    }

    pub fn remove_needle(&mut self, usage_id: DocId) -> Result<(), CoreError> {
        usage::detach(&mut self.needles_used, usage_id, UsageKind::Needle).map(|_| ())
    }

    // -- hooks ---------------------------------------------------------------

    pub fn add_hook(&mut self, input: NewHookUsage) -> Result<DocId, CoreError> {
        let item = HookUsage::from_input(input)?;
        usage::attach(&mut self.hooks_used, item, UsageKind::Hook)
    }

    pub fn update_hook(&mut self, usage_id: DocId, patch: ToolUsagePatch) -> Result<(), CoreError> {
        apply_tool_patch(&mut self.hooks_used, usage_id, patch, UsageKind::Hook)
    }

    pub fn remove_hook(&mut self, usage_id: DocId) -> Result<(), CoreError> {
        usage::detach(&mut self.hooks_used, usage_id, UsageKind::Hook).map(|_| ())
    }

    // -- derived costs -------------------------------------------------------

    pub fn total_yarn_cost(&self) -> f64 {
        self.yarns_used.iter().map(YarnUsage::line_total).sum()
    }

    pub fn total_additional_cost(&self) -> f64 {
        self.additional_costs.iter().map(|c| c.amount).sum()
    }

    pub fn total_project_cost(&self) -> f64 {
        self.total_yarn_cost() + self.total_additional_cost()
    }
}

/// Shared patch logic for needle and hook usage items.
///
/// Raising the primary flag demotes every sibling, so the single-primary
/// rule holds after an update just as it does after an add.
fn apply_tool_patch<U: UsageRecord>(
    items: &mut [U],
    usage_id: DocId,
    patch: ToolUsagePatch,
    kind: UsageKind,
) -> Result<(), CoreError> {
    usage::find_mut(items, usage_id, kind)?;
    if patch.is_empty() {
        return Err(empty_patch());
    }
    validate_input(&patch)?;

    match patch.is_primary {
        Some(true) => usage::promote(items, usage_id, kind)?,
        Some(false) => usage::find_mut(items, usage_id, kind)?.set_primary(false),
        None => {}
    }
    if let Some(text) = patch.notes {
        *usage::find_mut(items, usage_id, kind)?.notes_mut() = Some(text);
    }
    Ok(())
}
