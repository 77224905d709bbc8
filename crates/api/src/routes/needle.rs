use axum::routing::get;
use axum::Router;

use crate::handlers::needle;
use crate::state::AppState;

/// Routes mounted at `/needles`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(needle::list).post(needle::create))
        .route(
            "/{id}",
            get(needle::get_by_id)
                .put(needle::update)
                .delete(needle::delete),
        )
}
