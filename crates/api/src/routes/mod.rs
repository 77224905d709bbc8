pub mod conversion;
pub mod gauge;
pub mod health;
pub mod hook;
pub mod needle;
pub mod project;
pub mod yarn;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/status                            change status (PATCH)
/// /projects/{id}/photos                            add photo (POST)
/// /projects/{id}/yarns                             add yarn usage (POST)
/// /projects/{id}/yarns/{usage_id}                  update, remove
/// /projects/{id}/needles                           add needle usage (POST)
/// /projects/{id}/needles/{usage_id}                update, remove
/// /projects/{id}/hooks                             add hook usage (POST)
/// /projects/{id}/hooks/{usage_id}                  update, remove
/// /projects/{id}/costs                             add additional cost (POST)
/// /projects/{id}/costs/summary                     cost summary (GET)
///
/// /yarns                                           list, create
/// /yarns/{id}                                      get, update, delete
/// /yarns/{id}/photos                               add photo (POST)
///
/// /needles                                         list, create
/// /needles/{id}                                    get, update, delete
///
/// /hooks                                           list, create
/// /hooks/{id}                                      get, update, delete
///
/// /gauges                                          list, create
/// /gauges/{id}                                     get, update, delete
/// /gauges/{id}/photos                              add photo (POST)
///
/// /conversions                                     list, create
/// /conversions/{id}                                get, update, delete
/// /conversions/gauge/{gauge_id}                    list for one gauge
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/projects", project::router())
        .nest("/yarns", yarn::router())
        .nest("/needles", needle::router())
        .nest("/hooks", hook::router())
        .nest("/gauges", gauge::router())
        .nest("/conversions", conversion::router())
}
