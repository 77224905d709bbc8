//! HTTP-level integration tests for the `/projects` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, patch_json, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_yarn(pool: &PgPool, name: &str) -> String {
    let yarn = create(
        common::build_test_app(pool.clone()),
        "/api/v1/yarns",
        json!({"name": name, "price_per_unit": 8.0}),
    )
    .await;
    yarn["id"].as_str().unwrap().to_string()
}

async fn new_project(pool: &PgPool, body: Value) -> Value {
    create(common::build_test_app(pool.clone()), "/api/v1/projects", body).await
}

fn yarn_refs(project: &Value) -> Vec<String> {
    project["yarns_used"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["yarn_id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_returns_201_with_message(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        json!({"name": "Raglan Sweater", "project_type": "knitting"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Project created successfully");
    assert_eq!(json["data"]["name"], "Raglan Sweater");
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["version"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_mirrors_usage_items(pool: PgPool) {
    let first = new_yarn(&pool, "Merino").await;
    let second = new_yarn(&pool, "Silk").await;

    let project = new_project(
        &pool,
        json!({
            "name": "Shawl",
            "project_type": "knitting",
            "yarns_used": [
                {"yarn_id": first, "quantity_used": 2, "is_primary": true},
                {"yarn_id": second, "quantity_used": 1}
            ]
        }),
    )
    .await;

    assert_eq!(yarn_refs(&project), vec![first, second]);
    assert_eq!(project["yarns_used"][0]["yarn"]["name"], "Merino");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_duplicate_yarn_is_rejected(pool: PgPool) {
    let yarn = new_yarn(&pool, "Merino").await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/projects",
        json!({
            "name": "Twin Socks",
            "project_type": "knitting",
            "yarns_used": [
                {"yarn_id": yarn, "quantity_used": 1},
                {"yarn_id": yarn, "quantity_used": 2}
            ]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let list = body_json(get(common::build_test_app(pool), "/api/v1/projects").await).await;
    assert_eq!(list["pagination"]["total"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_completed_on_start_date(pool: PgPool) {
    let project = new_project(
        &pool,
        json!({
            "name": "Dishcloth",
            "project_type": "crochet",
            "start_date": "2024-05-01",
            "completion_date": "2024-05-01"
        }),
    )
    .await;
    assert_eq!(project["completion_date"], "2024-05-01");

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/projects",
        json!({
            "name": "Dishcloth",
            "project_type": "crochet",
            "start_date": "2024-05-01",
            "completion_date": "2024-04-30"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_unknown_project_type_is_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/projects",
        json!({"name": "Doily", "project_type": "tatting"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_is_stable_without_mutation(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Hat", "project_type": "crochet"})).await;
    let uri = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let first = body_json(get(common::build_test_app(pool.clone()), &uri).await).await;
    let second = body_json(get(common::build_test_app(pool), &uri).await).await;
    assert_eq!(first, second);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_missing_project_is_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects/018f2b4e-0000-7000-8000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_malformed_id_is_400(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/projects/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_status_and_delete(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Mitts", "project_type": "knitting"})).await;
    let uri = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let response = put_json(
        common::build_test_app(pool.clone()),
        &uri,
        json!({"comments": "Thumb gusset"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["comments"], "Thumb gusset");
    assert_eq!(updated["data"]["version"], 2);

    let response = patch_json(
        common::build_test_app(pool.clone()),
        &format!("{uri}/status"),
        json!({"status": "completed", "completion_date": "2026-03-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let done = body_json(response).await;
    assert_eq!(done["data"]["status"], "completed");
    assert_eq!(done["data"]["completion_date"], "2026-03-01");

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Project deleted successfully");

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_update_is_rejected(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Cowl", "project_type": "knitting"})).await;
    let uri = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let response = put_json(common::build_test_app(pool), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_pagination_over_25_projects(pool: PgPool) {
    for i in 0..25 {
        new_project(&pool, json!({"name": format!("Swatch {i}"), "project_type": "knitting"})).await;
    }

    let response = get(
        common::build_test_app(pool),
        "/api/v1/projects?page=2&limit=10",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
    assert_eq!(json["pagination"]["total"], 25);
    assert_eq!(json["pagination"]["total_pages"], 3);
    assert_eq!(json["pagination"]["has_next"], true);
    assert_eq!(json["pagination"]["has_prev"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_page_far_past_the_end_is_empty(pool: PgPool) {
    new_project(&pool, json!({"name": "Mitts", "project_type": "knitting"})).await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/projects?page=9223372036854775807&limit=100",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["pagination"]["has_next"], false);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/yarns?page=9223372036854775807",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_filters_by_type(pool: PgPool) {
    new_project(&pool, json!({"name": "Granny Square", "project_type": "crochet"})).await;
    new_project(&pool, json!({"name": "Socks", "project_type": "knitting"})).await;

    let json = body_json(
        get(
            common::build_test_app(pool.clone()),
            "/api/v1/projects?project_type=crochet&sort=name",
        )
        .await,
    )
    .await;
    assert_eq!(json["pagination"]["total"], 1);
    assert_eq!(json["data"][0]["name"], "Granny Square");

    let response = get(common::build_test_app(pool), "/api/v1/projects?colour=red").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Usage items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_same_yarn_twice_conflicts(pool: PgPool) {
    let yarn = new_yarn(&pool, "Merino").await;
    let project = new_project(&pool, json!({"name": "Hat", "project_type": "knitting"})).await;
    let uri = format!("/api/v1/projects/{}/yarns", project["id"].as_str().unwrap());

    let body = json!({"yarn_id": yarn, "quantity_used": 1});
    let response = post_json(common::build_test_app(pool.clone()), &uri, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(common::build_test_app(pool.clone()), &uri, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let current = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/projects/{}", project["id"].as_str().unwrap()),
        )
        .await,
    )
    .await;
    assert_eq!(yarn_refs(&current["data"]), vec![yarn]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_unknown_yarn_is_404(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Hat", "project_type": "knitting"})).await;
    let uri = format!("/api/v1/projects/{}/yarns", project["id"].as_str().unwrap());

    let response = post_json(
        common::build_test_app(pool),
        &uri,
        json!({"yarn_id": "018f2b4e-0000-7000-8000-000000000001", "quantity_used": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_primary_yarn_moves_to_new_item(pool: PgPool) {
    let first = new_yarn(&pool, "Merino").await;
    let second = new_yarn(&pool, "Alpaca").await;
    let project = new_project(
        &pool,
        json!({
            "name": "Cardigan",
            "project_type": "knitting",
            "yarns_used": [{"yarn_id": first, "quantity_used": 5, "is_primary": true}]
        }),
    )
    .await;
    let uri = format!("/api/v1/projects/{}/yarns", project["id"].as_str().unwrap());

    let view = create(
        common::build_test_app(pool),
        &uri,
        json!({"yarn_id": second, "quantity_used": 2, "is_primary": true}),
    )
    .await;

    assert_eq!(view["yarns_used"][0]["is_primary"], false);
    assert_eq!(view["yarns_used"][1]["is_primary"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_remove_yarn_usage(pool: PgPool) {
    let ids = [
        new_yarn(&pool, "A").await,
        new_yarn(&pool, "B").await,
        new_yarn(&pool, "C").await,
    ];
    let usages: Vec<Value> = ids
        .iter()
        .map(|id| json!({"yarn_id": id, "quantity_used": 1}))
        .collect();
    let project = new_project(
        &pool,
        json!({"name": "Blanket", "project_type": "crochet", "yarns_used": usages}),
    )
    .await;
    let project_id = project["id"].as_str().unwrap();
    let middle = project["yarns_used"][1]["id"].as_str().unwrap();

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/yarns/018f2b4e-0000-7000-8000-000000000002"),
        json!({"quantity_used": 3}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/yarns/{middle}"),
        json!({"quantity_used": 3, "cost_per_unit": 4}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["yarns_used"][1]["quantity_used"], 3.0);

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/yarns/{middle}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let removed = body_json(response).await;
    assert_eq!(
        yarn_refs(&removed["data"]),
        vec![ids[0].clone(), ids[2].clone()]
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_needle_and_hook_usage(pool: PgPool) {
    let needle = create(
        common::build_test_app(pool.clone()),
        "/api/v1/needles",
        json!({"size_mm": 4.0, "needle_type": "circular"}),
    )
    .await;
    let hook = create(
        common::build_test_app(pool.clone()),
        "/api/v1/hooks",
        json!({"size_mm": 5.0}),
    )
    .await;
    let project = new_project(&pool, json!({"name": "Sampler", "project_type": "knitting"})).await;
    let base = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let view = create(
        common::build_test_app(pool.clone()),
        &format!("{base}/needles"),
        json!({"needle_id": needle["id"], "is_primary": true}),
    )
    .await;
    assert_eq!(view["needles_used"][0]["needle"]["size_mm"], 4.0);

    let view = create(
        common::build_test_app(pool.clone()),
        &format!("{base}/hooks"),
        json!({"hook_id": hook["id"], "is_primary": true}),
    )
    .await;
    // Primaries are per kind.
    assert_eq!(view["needles_used"][0]["is_primary"], true);
    assert_eq!(view["hooks_used"][0]["is_primary"], true);

    let usage_id = view["hooks_used"][0]["id"].as_str().unwrap();
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("{base}/hooks/{usage_id}"),
        json!({"notes": "Border only"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["hooks_used"][0]["notes"], "Border only");

    let response = delete(
        common::build_test_app(pool),
        &format!("{base}/hooks/{usage_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"]["hooks_used"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Photos and costs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cost_summary_totals(pool: PgPool) {
    let first = new_yarn(&pool, "Merino").await;
    let second = new_yarn(&pool, "Silk").await;
    let project = new_project(
        &pool,
        json!({
            "name": "Vest",
            "project_type": "knitting",
            "yarns_used": [
                {"yarn_id": first, "quantity_used": 2, "cost_per_unit": 10},
                {"yarn_id": second, "quantity_used": 3, "cost_per_unit": 5}
            ]
        }),
    )
    .await;
    let base = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    let view = create(
        common::build_test_app(pool.clone()),
        &format!("{base}/costs"),
        json!({"description": "Buttons", "amount": 7, "category": "notions"}),
    )
    .await;
    assert_eq!(view["total_project_cost"], 42.0);

    let response = get(common::build_test_app(pool), &format!("{base}/costs/summary")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["yarn_cost"], 35.0);
    assert_eq!(summary["additional_cost"], 7.0);
    assert_eq!(summary["total_cost"], 42.0);
    assert_eq!(summary["currency"], "EUR");
    assert_eq!(summary["breakdown"]["yarns"][0]["yarn_name"], "Merino");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cost_summary_without_yarns_defaults_to_eur(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Bag", "project_type": "crochet"})).await;
    let base = format!("/api/v1/projects/{}", project["id"].as_str().unwrap());

    create(
        common::build_test_app(pool.clone()),
        &format!("{base}/costs"),
        json!({"description": "Lining", "amount": 15}),
    )
    .await;

    let summary = body_json(get(common::build_test_app(pool), &format!("{base}/costs/summary")).await)
        .await["data"]
        .clone();
    assert_eq!(summary["yarn_cost"], 0.0);
    assert_eq!(summary["total_cost"], 15.0);
    assert_eq!(summary["currency"], "EUR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_photo(pool: PgPool) {
    let project = new_project(&pool, json!({"name": "Tee", "project_type": "crochet"})).await;
    let uri = format!("/api/v1/projects/{}/photos", project["id"].as_str().unwrap());

    let response = post_json(
        common::build_test_app(pool),
        &uri,
        json!({"file_path": "uploads/tee.jpg", "photo_type": "progress"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["photos"][0]["file_path"], "uploads/tee.jpg");
    assert_eq!(json["data"]["photos"][0]["photo_type"], "progress");
}
