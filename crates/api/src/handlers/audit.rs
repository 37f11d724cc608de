//! Handlers for audit log queries. All endpoints require the admin role.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use fitout_db::models::audit::{AuditLog, AuditQuery};
use fitout_db::repositories::AuditLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Paged audit log response.
#[derive(Debug, Serialize)]
pub struct AuditLogPage {
    pub data: Vec<AuditLog>,
    pub total: i64,
}

/// GET /api/v1/admin/audit-logs
///
/// Query audit logs with optional filters (`user_id`, `action`,
/// `entity_type`, `entity_id`, `from`, `to`) and pagination (`limit`,
/// `offset`). Newest first.
pub async fn query_audit_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditLogPage>> {
    let data = AuditLogRepo::query(&state.pool, &query).await?;
    let total = AuditLogRepo::count(&state.pool, &query).await?;
    Ok(Json(AuditLogPage { data, total }))
}
