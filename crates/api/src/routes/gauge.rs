use axum::routing::{get, post};
use axum::Router;

use crate::handlers::gauge;
use crate::state::AppState;

/// Routes mounted at `/gauges`.
///
/// ```text
/// GET    /              -> list (?project=&gauge_type=)
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/photos   -> add_photo
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gauge::list).post(gauge::create))
        .route(
            "/{id}",
            get(gauge::get_by_id)
                .put(gauge::update)
                .delete(gauge::delete),
        )
        .route("/{id}/photos", post(gauge::add_photo))
}
