//! Handlers for the `/needles` catalog.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::{PageRequest, Paginated};
use stashbook_core::types::DocId;
use stashbook_db::models::needle::{CreateNeedle, Needle, NeedleFilter, UpdateNeedle};
use stashbook_db::repositories::NeedleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Needle", id })
}

/// GET /api/v1/needles
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<Needle>>>> {
    let filter = NeedleFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let (needles, total) = NeedleRepo::list(&state.pool, &filter, page).await?;
    Ok(ApiResponse::page(Paginated::new(needles, page, total)))
}

/// POST /api/v1/needles
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateNeedle>,
) -> AppResult<(StatusCode, Json<ApiResponse<Needle>>)> {
    input.normalize()?;
    let needle = NeedleRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created(needle, "Needle created successfully"))
}

/// GET /api/v1/needles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<Needle>>> {
    let needle = NeedleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(needle))
}

/// PUT /api/v1/needles/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateNeedle>,
) -> AppResult<Json<ApiResponse<Needle>>> {
    input.normalize()?;
    let needle = NeedleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(needle))
}

/// DELETE /api/v1/needles/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !NeedleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(ApiResponse::message("Needle deleted successfully"))
}
