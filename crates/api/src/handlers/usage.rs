//! Handlers for usage items under `/projects/{id}/{yarns,needles,hooks}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stashbook_core::project::{
    NewHookUsage, NewNeedleUsage, NewYarnUsage, ProjectView, ToolUsagePatch, YarnUsagePatch,
};
use stashbook_core::types::DocId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::ApiResponse;
use crate::state::AppState;

type ViewResponse = AppResult<Json<ApiResponse<ProjectView>>>;
type CreatedResponse = AppResult<(StatusCode, Json<ApiResponse<ProjectView>>)>;

// ---------------------------------------------------------------------------
// Yarns
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/yarns
pub async fn add_yarn(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewYarnUsage>,
) -> CreatedResponse {
    let project = state.engine.add_yarn(id, input).await?;
    Ok(ApiResponse::created(project, "Yarn added to project successfully"))
}

/// PUT /api/v1/projects/{id}/yarns/{usage_id}
pub async fn update_yarn(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
    AppJson(patch): AppJson<YarnUsagePatch>,
) -> ViewResponse {
    let project = state.engine.update_yarn(id, usage_id, patch).await?;
    Ok(ApiResponse::data(project))
}

/// DELETE /api/v1/projects/{id}/yarns/{usage_id}
pub async fn remove_yarn(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
) -> ViewResponse {
    let project = state.engine.remove_yarn(id, usage_id).await?;
    Ok(ApiResponse::data(project))
}

// ---------------------------------------------------------------------------
// Needles
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/needles
pub async fn add_needle(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewNeedleUsage>,
) -> CreatedResponse {
    let project = state.engine.add_needle(id, input).await?;
    Ok(ApiResponse::created(project, "Needle added to project successfully"))
}

/// PUT /api/v1/projects/{id}/needles/{usage_id}
pub async fn update_needle(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
    AppJson(patch): AppJson<ToolUsagePatch>,
) -> ViewResponse {
    let project = state.engine.update_needle(id, usage_id, patch).await?;
    Ok(ApiResponse::data(project))
}

/// DELETE /api/v1/projects/{id}/needles/{usage_id}
pub async fn remove_needle(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
) -> ViewResponse {
    let project = state.engine.remove_needle(id, usage_id).await?;
    Ok(ApiResponse::data(project))
}

// ---------------------------------------------------------------------------
// Hooks
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/hooks
pub async fn add_hook(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewHookUsage>,
) -> CreatedResponse {
    let project = state.engine.add_hook(id, input).await?;
    Ok(ApiResponse::created(project, "Hook added to project successfully"))
}

/// PUT /api/v1/projects/{id}/hooks/{usage_id}
pub async fn update_hook(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
    AppJson(patch): AppJson<ToolUsagePatch>,
) -> ViewResponse {
    let project = state.engine.update_hook(id, usage_id, patch).await?;
    Ok(ApiResponse::data(project))
}

/// DELETE /api/v1/projects/{id}/hooks/{usage_id}
pub async fn remove_hook(
    State(state): State<AppState>,
    AppPath((id, usage_id)): AppPath<(DocId, DocId)>,
) -> ViewResponse {
    let project = state.engine.remove_hook(id, usage_id).await?;
    Ok(ApiResponse::data(project))
}
