//! Route definitions for the `/projects` resource, including usage items.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{project, usage};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// PATCH  /{id}/status                 -> update_status
/// POST   /{id}/photos                 -> add_photo
/// POST   /{id}/costs                  -> add_cost
/// GET    /{id}/costs/summary          -> cost_summary
///
/// POST   /{id}/yarns                  -> add_yarn
/// PUT    /{id}/yarns/{usage_id}       -> update_yarn
/// DELETE /{id}/yarns/{usage_id}       -> remove_yarn
/// (same shape for needles and hooks)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/status", patch(project::update_status))
        .route("/{id}/photos", post(project::add_photo))
        .route("/{id}/costs", post(project::add_cost))
        .route("/{id}/costs/summary", get(project::cost_summary))
        .route("/{id}/yarns", post(usage::add_yarn))
        .route(
            "/{id}/yarns/{usage_id}",
            put(usage::update_yarn).delete(usage::remove_yarn),
        )
        .route("/{id}/needles", post(usage::add_needle))
        .route(
            "/{id}/needles/{usage_id}",
            put(usage::update_needle).delete(usage::remove_needle),
        )
        .route("/{id}/hooks", post(usage::add_hook))
        .route(
            "/{id}/hooks/{usage_id}",
            put(usage::update_hook).delete(usage::remove_hook),
        )
}
