//! Integration tests for the authentication flow: login, lockout, refresh
//! rotation, and logout.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json_public};
use sqlx::PgPool;

use fitout_api::auth::password::hash_password;
use fitout_db::models::user::InsertUser;
use fitout_db::repositories::UserRepo;

/// Insert a user directly through the repository layer.
async fn seed_user(pool: &PgPool, username: &str, password: &str, role: &str) -> i64 {
    let insert = InsertUser {
        username: username.to_string(),
        email: None,
        password_hash: hash_password(password).expect("hashing should succeed"),
        role: role.to_string(),
    };
    UserRepo::create(pool, &insert)
        .await
        .expect("user insert should succeed")
        .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_tokens_and_user_info(pool: PgPool) {
    seed_user(&pool, "pm.sara", "construction-2026", "coordinator").await;

    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "pm.sara", "password": "construction-2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "pm.sara");
    assert_eq!(json["user"]["role"], "coordinator");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_returns_401(pool: PgPool) {
    seed_user(&pool, "pm.sara", "construction-2026", "coordinator").await;

    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "pm.sara", "password": "nope"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_username_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "ghost", "password": "whatever"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn repeated_failures_lock_the_account(pool: PgPool) {
    seed_user(&pool, "pm.sara", "construction-2026", "coordinator").await;

    // Five bad attempts trip the lockout.
    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let response = post_json_public(
            app,
            "/api/v1/auth/login",
            serde_json::json!({"username": "pm.sara", "password": "bad"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is rejected while locked.
    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "pm.sara", "password": "construction-2026"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    seed_user(&pool, "pm.sara", "construction-2026", "coordinator").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "pm.sara", "password": "construction-2026"}),
    )
    .await;
    let login = body_json(response).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and returns a different refresh token.
    let app = common::build_test_app(pool.clone());
    let response = post_json_public(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = body_json(response).await;
    assert_ne!(refreshed["refresh_token"].as_str().unwrap(), refresh_token);

    // The rotated-out token is dead.
    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    let user_id = seed_user(&pool, "pm.sara", "construction-2026", "coordinator").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_public(
        app,
        "/api/v1/auth/login",
        serde_json::json!({"username": "pm.sara", "password": "construction-2026"}),
    )
    .await;
    let login = body_json(response).await;
    let refresh_token = login["refresh_token"].as_str().unwrap().to_string();
    let bearer = format!("Bearer {}", common::token_for(user_id, "coordinator"));

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(app, "/api/v1/auth/logout", &bearer, serde_json::json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The refresh token no longer works after logout.
    let app = common::build_test_app(pool);
    let response = post_json_public(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({"refresh_token": refresh_token}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
