use axum::routing::get;
use axum::Router;

use crate::handlers::hook;
use crate::state::AppState;

/// Routes mounted at `/hooks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hook::list).post(hook::create))
        .route(
            "/{id}",
            get(hook::get_by_id).put(hook::update).delete(hook::delete),
        )
}
