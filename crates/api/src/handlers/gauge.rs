//! Handlers for the `/gauges` resource.
//!
//! Every response carries the derived stitch and row densities, with the
//! project, yarn, needle and hook references expanded.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::{PageRequest, Paginated};
use stashbook_core::types::DocId;
use stashbook_db::models::gauge::{CreateGauge, GaugeFilter, GaugeView, UpdateGauge};
use stashbook_db::models::photo::{CatalogPhoto, NewCatalogPhoto};
use stashbook_db::repositories::{GaugeRepo, ProjectRepo};
use stashbook_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Gauge", id })
}

async fn ensure_project(pool: &DbPool, project_id: DocId) -> AppResult<()> {
    if !ProjectRepo::exists(pool, project_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }));
    }
    Ok(())
}

/// GET /api/v1/gauges
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<GaugeView>>>> {
    let filter = GaugeFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let (gauges, total) = GaugeRepo::list(&state.pool, &filter, page).await?;
    let views = state.catalog.expand_gauges(gauges).await?;
    Ok(ApiResponse::page(Paginated::new(views, page, total)))
}

/// POST /api/v1/gauges
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateGauge>,
) -> AppResult<(StatusCode, Json<ApiResponse<GaugeView>>)> {
    input.normalize()?;
    ensure_project(&state.pool, input.project_id).await?;
    let gauge = GaugeRepo::create(&state.pool, &input).await?;
    tracing::info!(gauge_id = %gauge.id, project_id = %gauge.project_id, "Gauge created");
    Ok(ApiResponse::created(
        state.catalog.expand_gauge(gauge).await?,
        "Gauge created successfully",
    ))
}

/// GET /api/v1/gauges/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<GaugeView>>> {
    let gauge = GaugeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(state.catalog.expand_gauge(gauge).await?))
}

/// PUT /api/v1/gauges/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateGauge>,
) -> AppResult<Json<ApiResponse<GaugeView>>> {
    input.normalize()?;
    let current = GaugeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    input.check_against(&current)?;
    if let Some(project_id) = input.project_id {
        ensure_project(&state.pool, project_id).await?;
    }

    let gauge = GaugeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(state.catalog.expand_gauge(gauge).await?))
}

/// DELETE /api/v1/gauges/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !GaugeRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(gauge_id = %id, "Gauge deleted");
    Ok(ApiResponse::message("Gauge deleted successfully"))
}

/// POST /api/v1/gauges/{id}/photos
pub async fn add_photo(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(input): AppJson<NewCatalogPhoto>,
) -> AppResult<(StatusCode, Json<ApiResponse<GaugeView>>)> {
    let photo = CatalogPhoto::from_input(input, Utc::now())?;
    let gauge = GaugeRepo::add_photo(&state.pool, id, &photo)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::created(
        state.catalog.expand_gauge(gauge).await?,
        "Photo added successfully",
    ))
}
