//! Handlers for the `/yarns` catalog.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::{PageRequest, Paginated};
use stashbook_core::types::DocId;
use stashbook_db::models::photo::{CatalogPhoto, NewCatalogPhoto};
use stashbook_db::models::yarn::{CreateYarn, UpdateYarn, Yarn, YarnFilter, YarnWithUsage};
use stashbook_db::repositories::YarnRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Yarn", id })
}

/// GET /api/v1/yarns
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<YarnWithUsage>>>> {
    let filter = YarnFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let (yarns, total) = YarnRepo::list(&state.pool, &filter, page).await?;
    Ok(ApiResponse::page(Paginated::new(yarns, page, total)))
}

/// POST /api/v1/yarns
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateYarn>,
) -> AppResult<(StatusCode, Json<ApiResponse<Yarn>>)> {
    input.normalize()?;
    let yarn = YarnRepo::create(&state.pool, &input).await?;
    tracing::info!(yarn_id = %yarn.id, "Yarn created");
    Ok(ApiResponse::created(yarn, "Yarn created successfully"))
}

/// GET /api/v1/yarns/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<YarnWithUsage>>> {
    let yarn = YarnRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(yarn))
}

/// PUT /api/v1/yarns/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateYarn>,
) -> AppResult<Json<ApiResponse<Yarn>>> {
    input.normalize()?;
    let yarn = YarnRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(yarn))
}

/// DELETE /api/v1/yarns/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !YarnRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(yarn_id = %id, "Yarn deleted");
    Ok(ApiResponse::message("Yarn deleted successfully"))
}

/// POST /api/v1/yarns/{id}/photos
pub async fn add_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewCatalogPhoto>,
) -> AppResult<(StatusCode, Json<ApiResponse<Yarn>>)> {
    let photo = CatalogPhoto::from_input(input, Utc::now())?;
    let yarn = YarnRepo::add_photo(&state.pool, id, &photo)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::created(yarn, "Photo added successfully"))
}
