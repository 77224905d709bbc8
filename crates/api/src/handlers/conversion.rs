//! Handlers for the `/conversions` resource.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use stashbook_core::error::CoreError;
use stashbook_core::pagination::{PageRequest, Paginated};
use stashbook_core::types::DocId;
use stashbook_db::models::conversion::{
    Conversion, ConversionFilter, CreateConversion, UpdateConversion,
};
use stashbook_db::repositories::{ConversionRepo, GaugeRepo};
use stashbook_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

fn not_found(id: DocId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Conversion",
        id,
    })
}

async fn ensure_gauge(pool: &DbPool, gauge_id: DocId) -> AppResult<()> {
    if GaugeRepo::find_by_id(pool, gauge_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Gauge",
            id: gauge_id,
        }));
    }
    Ok(())
}

/// GET /api/v1/conversions
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> AppResult<Json<ApiResponse<Vec<Conversion>>>> {
    let filter = ConversionFilter::from_query(&params)?;
    let page = PageRequest::from_params(&params);
    let (conversions, total) = ConversionRepo::list(&state.pool, &filter, page).await?;
    Ok(ApiResponse::page(Paginated::new(conversions, page, total)))
}

/// GET /api/v1/conversions/gauge/{gauge_id}
pub async fn list_by_gauge(
    State(state): State<AppState>,
    AppPath(gauge_id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<Vec<Conversion>>>> {
    ensure_gauge(&state.pool, gauge_id).await?;
    let conversions = ConversionRepo::list_by_gauge(&state.pool, gauge_id).await?;
    Ok(ApiResponse::data(conversions))
}

/// POST /api/v1/conversions
pub async fn create(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<CreateConversion>,
) -> AppResult<(StatusCode, Json<ApiResponse<Conversion>>)> {
    input.normalize()?;
    ensure_gauge(&state.pool, input.gauge_id).await?;
    let conversion = ConversionRepo::create(&state.pool, &input).await?;
    Ok(ApiResponse::created(conversion, "Conversion created successfully"))
}

/// GET /api/v1/conversions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<Conversion>>> {
    let conversion = ConversionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(conversion))
}

/// PUT /api/v1/conversions/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
    AppJson(mut input): AppJson<UpdateConversion>,
) -> AppResult<Json<ApiResponse<Conversion>>> {
    input.normalize()?;
    if let Some(gauge_id) = input.gauge_id {
        ensure_gauge(&state.pool, gauge_id).await?;
    }
    let conversion = ConversionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(ApiResponse::data(conversion))
}

/// DELETE /api/v1/conversions/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DocId>,
) -> AppResult<Json<ApiResponse<()>>> {
    if !ConversionRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    Ok(ApiResponse::message("Conversion deleted successfully"))
}
