//! Handlers for the `/projects` resource: lifecycle, status, photos, costs.
//!
//! Usage items live in [`super::usage`].

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stashbook_core::pagination::PageRequest;
use stashbook_core::project::{
    CostSummary, CreateProject, NewCost, NewPhoto, ProjectView, UpdateProject,
    UpdateProjectStatus,
};
use stashbook_core::store::ProjectFilter;
use stashbook_core::types::DocId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<ProjectView>>>> {
    let filter = ProjectFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let projects = state.engine.list(&filter, page).await?;
    Ok(ApiResponse::page(projects))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectView>>)> {
    let project = state.engine.create(input).await?;
    Ok(ApiResponse::created(project, "Project created successfully"))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<ProjectView>>> {
    let project = state.engine.get(id).await?;
    Ok(ApiResponse::data(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<ApiResponse<ProjectView>>> {
    let project = state.engine.update(id, input).await?;
    Ok(ApiResponse::data(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.engine.delete(id).await?;
    Ok(ApiResponse::message("Project deleted successfully"))
}

/// PATCH /api/v1/projects/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<UpdateProjectStatus>,
) -> AppResult<Json<ApiResponse<ProjectView>>> {
    let project = state.engine.update_status(id, input).await?;
    Ok(ApiResponse::data(project))
}

/// POST /api/v1/projects/{id}/photos
pub async fn add_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewPhoto>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectView>>)> {
    let project = state.engine.add_photo(id, input).await?;
    Ok(ApiResponse::created(project, "Photo added successfully"))
}

/// POST /api/v1/projects/{id}/costs
pub async fn add_cost(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewCost>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProjectView>>)> {
    let project = state.engine.add_cost(id, input).await?;
    Ok(ApiResponse::created(project, "Cost added successfully"))
}

/// GET /api/v1/projects/{id}/costs/summary
pub async fn cost_summary(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<CostSummary>>> {
    let summary = state.engine.cost_summary(id).await?;
    Ok(ApiResponse::data(summary))
}
