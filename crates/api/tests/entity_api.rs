//! HTTP-level integration tests for entity CRUD endpoints: projects,
//! companies, invoices, drawings (multipart upload), and validation errors.

mod common;

use axum::http::StatusCode;
use common::{
    admin_bearer, body_json, contractor_bearer, coordinator_bearer, delete, get_auth, post_json,
    post_multipart, put_json,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_project_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "BK Mall of Arabia", "chain": "bk", "location": "Cairo"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "BK Mall of Arabia");
    assert_eq!(json["status"], "not_started");
    assert_eq!(json["progress"], 0);
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_project_by_id(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Get Me", "chain": "tc"}),
    )
    .await;
    let created = body_json(create_resp).await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Get Me");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_nonexistent_project_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/projects/999999", &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_chain_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Bad chain", "chain": "kfc"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_delete_project(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Old name", "chain": "bk"}),
    )
    .await;
    let id = body_json(create_resp).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/projects/{id}"),
        &coordinator_bearer(),
        serde_json::json!({"name": "New name", "status": "in_progress"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New name");
    assert_eq!(json["status"], "in_progress");

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/projects/{id}"), &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/projects/{id}"), &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_contractor_cannot_create_project(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/projects",
        &contractor_bearer(),
        serde_json::json!({"name": "Forbidden", "chain": "bk"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Item validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_item_status_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Item host", "chain": "bk"}),
    )
    .await;
    let project_id = body_json(create_resp).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/items"),
        &coordinator_bearer(),
        serde_json::json!({"name": "Bad", "scope": "owner", "status": "shipped"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_company_crud_and_unique_name(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/companies",
        &coordinator_bearer(),
        serde_json::json!({"name": "Al Futtaim Interiors", "trade": "joinery"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    // Duplicate name trips the unique constraint -> 409.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/companies",
        &coordinator_bearer(),
        serde_json::json!({"name": "Al Futtaim Interiors"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/api/v1/companies/{id}"), &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Invoices
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invoice_crud(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/projects",
        &coordinator_bearer(),
        serde_json::json!({"name": "Invoice host", "chain": "tc"}),
    )
    .await;
    let project_id = body_json(create_resp).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/projects/{project_id}/invoices"),
        &coordinator_bearer(),
        serde_json::json!({"invoice_number": "INV-001", "amount": 12500.50}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let invoice = body_json(response).await;
    assert_eq!(invoice["status"], "pending");
    let invoice_id = invoice["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/invoices/{invoice_id}"),
        &coordinator_bearer(),
        serde_json::json!({"status": "paid"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "paid");
}

// ---------------------------------------------------------------------------
// Drawing upload (multipart)
// ---------------------------------------------------------------------------

/// 1x1 transparent PNG.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x62, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Build a multipart body with a `title` text field and a PNG `file` field.
fn drawing_multipart(boundary: &str, title: &str) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"title\"\r\n\r\n{title}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\ncontent-disposition: form-data; name=\"file\"; \
             filename=\"plan.png\"\r\ncontent-type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(TINY_PNG);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_drawing_upload_stores_file_and_dimensions(pool: PgPool) {
    // The uploader is recorded on the drawing row, so it must be a real user.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/users",
        &admin_bearer(),
        serde_json::json!({
            "username": "drafter",
            "password": "long-enough-password",
            "role": "coordinator",
        }),
    )
    .await;
    let uploader_id = body_json(response).await["id"].as_i64().unwrap();
    let bearer = format!("Bearer {}", common::token_for(uploader_id, "coordinator"));

    let app = common::build_test_app(pool.clone());
    let create_resp = post_json(
        app,
        "/api/v1/projects",
        &bearer,
        serde_json::json!({"name": "Drawing host", "chain": "bk"}),
    )
    .await;
    let project_id = body_json(create_resp).await["id"].as_i64().unwrap();

    let boundary = "X-FITOUT-TEST-BOUNDARY";
    let app = common::build_test_app(pool.clone());
    let response = post_multipart(
        app,
        &format!("/api/v1/projects/{project_id}/drawings"),
        &bearer,
        boundary,
        drawing_multipart(boundary, "Ground floor plan"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let drawing = body_json(response).await;
    assert_eq!(drawing["title"], "Ground floor plan");
    assert_eq!(drawing["kind"], "drawing");
    assert_eq!(drawing["width"], 1);
    assert_eq!(drawing["height"], 1);
    let file_url = drawing["file_url"].as_str().unwrap();
    assert!(file_url.starts_with("/files/drawings/"));
    assert!(file_url.ends_with(".png"));
}

// ---------------------------------------------------------------------------
// Admin users + audit logs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_user_management_and_rbac(pool: PgPool) {
    // Coordinators cannot manage users.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/admin/users", &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/users",
        &admin_bearer(),
        serde_json::json!({
            "username": "site.engineer",
            "password": "long-enough-password",
            "role": "contractor",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["role"], "contractor");
    assert!(user.get("password_hash").is_none());

    // Weak password is rejected.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/users",
        &admin_bearer(),
        serde_json::json!({"username": "weak", "password": "short"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown role is rejected.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/admin/users",
        &admin_bearer(),
        serde_json::json!({
            "username": "other",
            "password": "long-enough-password",
            "role": "superuser",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_mutations_append_audit_logs(pool: PgPool) {
    // Use a real user so the audit rows keep their user reference.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/admin/users",
        &admin_bearer(),
        serde_json::json!({
            "username": "auditor",
            "password": "long-enough-password",
            "role": "coordinator",
        }),
    )
    .await;
    let user_id = body_json(response).await["id"].as_i64().unwrap();
    let bearer = format!("Bearer {}", common::token_for(user_id, "coordinator"));

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/projects",
        &bearer,
        serde_json::json!({"name": "Audited project", "chain": "bk"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/admin/audit-logs?user_id={user_id}&action=entity_create"),
        &admin_bearer(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_json(response).await;
    assert!(page["total"].as_i64().unwrap() >= 1);
    assert_eq!(page["data"][0]["entity_type"], "project");

    // Non-admins cannot read audit logs.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/audit-logs", &bearer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Dashboard summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_dashboard_summary_counts_projects(pool: PgPool) {
    for (name, status) in [("P1", "in_progress"), ("P2", "in_progress"), ("P3", "completed")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/projects",
            &coordinator_bearer(),
            serde_json::json!({"name": name, "chain": "bk", "status": status}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/dashboard", &coordinator_bearer()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_projects"], 3);
    let by_status = json["data"]["projects_by_status"].as_array().unwrap();
    assert!(by_status
        .iter()
        .any(|s| s["status"] == "in_progress" && s["count"] == 2));
}
