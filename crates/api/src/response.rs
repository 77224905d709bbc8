//! Shared response envelope for API handlers.
//!
//! Every success body is `{ "success": true, "data"?, "message"?,
//! "pagination"? }`. Errors use the same `success` flag, see
//! [`AppError`](crate::error::AppError).

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use stashbook_core::pagination::{Paginated, PaginationMeta};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
            pagination: None,
        })
    }

    /// `201 Created` with the new resource and a confirmation message.
    pub fn created(data: T, message: &str) -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(Self {
                success: true,
                data: Some(data),
                message: Some(message.to_string()),
                pagination: None,
            }),
        )
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn page(page: Paginated<T>) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(page.data),
            message: None,
            pagination: Some(page.pagination),
        })
    }
}

impl ApiResponse<()> {
    /// Body without data, e.g. after a delete.
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
            pagination: None,
        })
    }
}
