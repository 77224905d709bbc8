//! Handlers for the `/hooks` catalog.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::{PageRequest, Paginated};
use stashbook_core::types::DocId;
use stashbook_db::models::hook::{CreateHook, Hook, HookFilter, UpdateHook};
use stashbook_db::repositories::HookRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Hook", id })
}

/// GET /api/v1/hooks
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<Hook>>>> {
    let filter = HookFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let (hooks, total) = HookRepo::list(&state.pool, &filter, page).await?;
    Ok(ApiResponse::page(Paginated::new(hooks, page, total)))
}

/// POST /api/v1/hooks
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateHook>,
) -> AppResult<(StatusCode, Json<ApiResponse<Hook>>)> {
    input.normalize()?;
    let hook = HookRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created(hook, "Hook created successfully"))
}

/// GET /api/v1/hooks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<Hook>>> {
    let hook = HookRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(hook))
}

/// PUT /api/v1/hooks/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateHook>,
) -> AppResult<Json<ApiResponse<Hook>>> {
    input.normalize()?;
    let hook = HookRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(hook))
}

/// DELETE /api/v1/hooks/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !HookRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(ApiResponse::message("Hook deleted successfully"))
}
