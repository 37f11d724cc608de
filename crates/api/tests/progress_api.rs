//! HTTP-level tests for the progress recompute triggered by item and
//! milestone mutations.

mod common;

use axum::http::StatusCode;
use common::{body_json, coordinator_bearer, delete, get_auth, post_json, put_json};
use sqlx::PgPool;

/// Create a project and return its id.
async fn create_project(pool: &PgPool) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Downtown BK refit", "chain": "bk"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Fetch the project's stored progress.
async fn stored_progress(pool: &PgPool, project_id: i64) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}"),
        &coordinator_bearer(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["progress"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_project_has_zero_progress(pool: PgPool) {
    let project_id = create_project(&pool).await;
    assert_eq!(stored_progress(&pool, project_id).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn single_completed_milestone_yields_100(pool: PgPool) {
    let project_id = create_project(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/milestones"),
        &coordinator_bearer(),
        serde_json::json!({"name": "Handover", "status": "completed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(stored_progress(&pool, project_id).await, 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn owner_and_contractor_items_round_half_up(pool: PgPool) {
    let project_id = create_project(&pool).await;

    // Owner item at Delivered scores 75.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/items"),
        &coordinator_bearer(),
        serde_json::json!({
            "name": "Kitchen hood",
            "scope": "owner",
            "status": "delivered",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Contractor item at 50% scores 50: (75 + 50) / 2 = 62.5 -> 63.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/items"),
        &coordinator_bearer(),
        serde_json::json!({
            "name": "Ceiling works",
            "scope": "contractor",
            "completion_percentage": 50,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    assert_eq!(stored_progress(&pool, project_id).await, 63);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn milestone_statuses_score_per_contract(pool: PgPool) {
    let project_id = create_project(&pool).await;

    // not_started (0) + in_progress (50) + completed (100) + delayed (25)
    // = 175 / 4 = 43.75 -> 44.
    for (name, status) in [
        ("Design", "not_started"),
        ("Civil", "in_progress"),
        ("MEP", "completed"),
        ("Joinery", "delayed"),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            &format!("/api/v1/projects/{project_id}/milestones"),
            &coordinator_bearer(),
            serde_json::json!({"name": name, "status": status}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    assert_eq!(stored_progress(&pool, project_id).await, 44);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn item_update_triggers_recompute(pool: PgPool) {
    let project_id = create_project(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/items"),
        &coordinator_bearer(),
        serde_json::json!({"name": "Signage", "scope": "owner", "status": "not_ordered"}),
    )
    .await;
    let item_id = body_json(response).await["id"].as_i64().unwrap();
    assert_eq!(stored_progress(&pool, project_id).await, 0);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/items/{item_id}"),
        &coordinator_bearer(),
        serde_json::json!({"status": "installed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(stored_progress(&pool, project_id).await, 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_an_entity_shrinks_the_denominator(pool: PgPool) {
    let project_id = create_project(&pool).await;

    // Installed item (100) + not_started milestone (0): progress 50.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/items"),
        &coordinator_bearer(),
        serde_json::json!({"name": "Fryer", "scope": "owner", "status": "installed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/milestones"),
        &coordinator_bearer(),
        serde_json::json!({"name": "Snag list", "status": "not_started"}),
    )
    .await;
    let milestone_id = body_json(response).await["id"].as_i64().unwrap();
    assert_eq!(stored_progress(&pool, project_id).await, 50);

    // Removing the milestone leaves only the installed item: progress 100.
    let app = common::build_test_app(pool.clone());
    let response = delete(
        app,
        &format!("/api/v1/projects/{project_id}/milestones/{milestone_id}"),
        &coordinator_bearer(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(stored_progress(&pool, project_id).await, 100);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_override_progress_directly(pool: PgPool) {
    let project_id = create_project(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/progress"),
        &common::admin_bearer(),
        serde_json::json!({"progress": 42}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(stored_progress(&pool, project_id).await, 42);

    // Coordinators cannot override.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project_id}/progress"),
        &coordinator_bearer(),
        serde_json::json!({"progress": 99}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
