use axum::routing::{get, post};
use axum::Router;

use crate::handlers::yarn;
use crate::state::AppState;

/// Routes mounted at `/yarns`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/photos   -> add_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(yarn::list).post(yarn::create))
        .route(
            "/{id}",
            get(yarn::get_by_id).put(yarn::update).delete(yarn::delete),
        )
        .route("/{id}/photos", post(yarn::add_photo))
}
