use axum::routing::get;
use axum::Router;

use crate::handlers::conversion;
use crate::state::AppState;

/// Routes mounted at `/conversions`.
///
/// ```text
/// GET    /                    -> list (?gauge=)
/// POST   /                    -> create
/// GET    /gauge/{gauge_id}    -> list_by_gauge
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(conversion::list).post(conversion::create))
        .route("/gauge/{gauge_id}", get(conversion::list_by_gauge))
        .route(
            "/{id}",
            get(conversion::get_by_id)
                .put(conversion::update)
                .delete(conversion::delete),
        )
}
