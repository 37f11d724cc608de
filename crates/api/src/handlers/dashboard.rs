//! Dashboard summary endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::Row;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Project counts by status plus the mean stored progress.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_projects: i64,
    pub projects_by_status: Vec<StatusCount>,
    /// Mean of the stored `progress` values, 0 when there are no projects.
    pub average_progress: f64,
}

/// One status bucket.
#[derive(Debug, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let rows = sqlx::query(
        "SELECT status, COUNT(*) AS count FROM projects GROUP BY status ORDER BY status",
    )
    .fetch_all(&state.pool)
    .await?;

    let projects_by_status: Vec<StatusCount> = rows
        .iter()
        .map(|row| StatusCount {
            status: row.get("status"),
            count: row.get("count"),
        })
        .collect();
    let total_projects: i64 = projects_by_status.iter().map(|s| s.count).sum();

    let average_progress: f64 =
        sqlx::query_scalar("SELECT COALESCE(AVG(progress), 0)::DOUBLE PRECISION FROM projects")
            .fetch_one(&state.pool)
            .await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            total_projects,
            projects_by_status,
            average_progress,
        },
    }))
}
