//! Repository for the append-only `audit_logs` table.

use sqlx::PgPool;

use crate::models::audit::{AuditLog, AuditQuery, CreateAuditLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, action, entity_type, entity_id, details, created_at";

/// Default page size for audit queries.
const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on page size.
const MAX_LIMIT: i64 = 200;

/// Provides insert and query operations for audit logs. There is no update
/// or delete: the table is append-only.
pub struct AuditLogRepo;

impl AuditLogRepo {
    /// Append an audit log entry.
    pub async fn insert(pool: &PgPool, entry: &CreateAuditLog) -> Result<AuditLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO audit_logs (user_id, action, entity_type, entity_id, details)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(entry.user_id)
            .bind(&entry.action)
            .bind(&entry.entity_type)
            .bind(entry.entity_id)
            .bind(&entry.details)
            .fetch_one(pool)
            .await
    }

    /// Query audit logs with optional filters, newest first.
    pub async fn query(pool: &PgPool, q: &AuditQuery) -> Result<Vec<AuditLog>, sqlx::Error> {
        let limit = q.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = q.offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR action = $2)
               AND ($3::TEXT IS NULL OR entity_type = $3)
               AND ($4::BIGINT IS NULL OR entity_id = $4)
               AND ($5::TIMESTAMPTZ IS NULL OR created_at >= $5)
               AND ($6::TIMESTAMPTZ IS NULL OR created_at <= $6)
             ORDER BY created_at DESC, id DESC
             LIMIT $7 OFFSET $8"
        );
        sqlx::query_as::<_, AuditLog>(&query)
            .bind(q.user_id)
            .bind(&q.action)
            .bind(&q.entity_type)
            .bind(q.entity_id)
            .bind(q.from)
            .bind(q.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count entries matching the same filters (for pagination totals).
    pub async fn count(pool: &PgPool, q: &AuditQuery) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM audit_logs
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR action = $2)
               AND ($3::TEXT IS NULL OR entity_type = $3)
               AND ($4::BIGINT IS NULL OR entity_id = $4)
               AND ($5::TIMESTAMPTZ IS NULL OR created_at >= $5)
               AND ($6::TIMESTAMPTZ IS NULL OR created_at <= $6)",
        )
        .bind(q.user_id)
        .bind(&q.action)
        .bind(&q.entity_type)
        .bind(q.entity_id)
        .bind(q.from)
        .bind(q.to)
        .fetch_one(pool)
        .await?;
        Ok(total)
    }
}
