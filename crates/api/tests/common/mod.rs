#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fitout_api::auth::jwt::{generate_access_token, JwtConfig};
use fitout_api::config::ServerConfig;
use fitout_api::router::build_app_router;
use fitout_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The JWT secret is an explicit test double; no environment variables are
/// consulted. Uploads land under the OS temp directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_dir: std::env::temp_dir().join("fitout-test-storage"),
        public_files_base: "/files".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Bearer token for an arbitrary user id + role, signed with the test secret.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt)
        .expect("token generation should succeed")
}

/// `Authorization` header value for an admin principal.
pub fn admin_bearer() -> String {
    format!("Bearer {}", token_for(1, "admin"))
}

/// `Authorization` header value for a coordinator principal.
pub fn coordinator_bearer() -> String {
    format!("Bearer {}", token_for(2, "coordinator"))
}

/// `Authorization` header value for a contractor principal.
pub fn contractor_bearer() -> String {
    format!("Bearer {}", token_for(3, "contractor"))
}

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, bearer: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header("authorization", bearer)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a JSON request with the given method and Bearer token.
pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", bearer)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an authenticated POST with a JSON body.
pub async fn post_json(
    app: Router,
    uri: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, bearer, body).await
}

/// Send an unauthenticated POST with a JSON body (login, refresh).
pub async fn post_json_public(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an authenticated PUT with a JSON body.
pub async fn put_json(
    app: Router,
    uri: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, bearer, body).await
}

/// Send an authenticated DELETE.
pub async fn delete(app: Router, uri: &str, bearer: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header("authorization", bearer)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send an authenticated multipart POST.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    bearer: &str,
    boundary: &str,
    body: Vec<u8>,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("authorization", bearer)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
