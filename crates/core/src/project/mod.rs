//! The project aggregate: stored document, embedded records, input DTOs,
//! the expanded read model and the derived cost report.

pub mod cost;
pub mod document;
pub mod input;
pub mod usage;
pub mod view;

pub use cost::{AdditionalCostLine, CostBreakdown, CostSummary, CurrencyTotal, YarnCostLine};
pub use document::{
    AdditionalCost, HookUsage, NeedleUsage, Photo, Project, YarnUsage, INITIAL_VERSION,
};
pub use input::{
    CreateProject, NewCost, NewHookUsage, NewNeedleUsage, NewPhoto, NewYarnUsage, ToolUsagePatch,
    UpdateProject, UpdateProjectStatus, YarnUsagePatch,
};
pub use usage::UsageKind;
pub use view::{
    HookUsageView, NeedleUsageView, ProjectView, ReferencedIds, ResolvedReferences, YarnUsageView,
};
