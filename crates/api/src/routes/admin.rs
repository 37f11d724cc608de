//! Route definitions for admin-only resources (users, audit logs).

use axum::routing::get;
use axum::Router;

use crate::handlers::{audit, user};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /users        -> list
/// POST   /users        -> create
/// GET    /users/{id}   -> get_by_id
/// PUT    /users/{id}   -> update
/// DELETE /users/{id}   -> delete
/// GET    /audit-logs   -> query_audit_logs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(user::list).post(user::create))
        .route(
            "/users/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
        .route("/audit-logs", get(audit::query_audit_logs))
}
