//! Audit log recording helper.
//!
//! Recording an audit entry must never fail the request that triggered it:
//! errors are logged and swallowed.

use sqlx::PgPool;

use fitout_core::audit::redact_sensitive_fields;
use fitout_core::types::DbId;
use fitout_db::models::audit::CreateAuditLog;
use fitout_db::repositories::AuditLogRepo;

/// Append an audit log entry. `details` is redacted before storage.
pub async fn record(
    pool: &PgPool,
    user_id: Option<DbId>,
    action: &str,
    entity_type: &str,
    entity_id: Option<DbId>,
    details: Option<serde_json::Value>,
) {
    let entry = CreateAuditLog {
        user_id,
        action: action.to_string(),
        entity_type: Some(entity_type.to_string()),
        entity_id,
        details: details.as_ref().map(redact_sensitive_fields),
    };

    if let Err(e) = AuditLogRepo::insert(pool, &entry).await {
        tracing::warn!(action, entity_type, error = %e, "Failed to record audit log entry");
    }
}
