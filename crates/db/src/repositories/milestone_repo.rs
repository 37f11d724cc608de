//! Repository for the `timeline_milestones` table.

use sqlx::postgres::Postgres;
use sqlx::{Executor, PgPool};

use fitout_core::types::DbId;

use crate::models::milestone::{CreateMilestone, TimelineMilestone, UpdateMilestone};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, name, planned_date, actual_date, status, created_at, updated_at";

/// Provides CRUD operations for timeline milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a new milestone under a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMilestone,
    ) -> Result<TimelineMilestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO timeline_milestones (project_id, name, planned_date, actual_date, status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'not_started'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineMilestone>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.planned_date)
            .bind(input.actual_date)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a milestone by ID, scoped to its project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<TimelineMilestone>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM timeline_milestones WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, TimelineMilestone>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all milestones of a project ordered by planned date, earliest
    /// first (undated milestones last).
    ///
    /// Generic over the executor so the progress recompute can read inside
    /// its transaction.
    pub async fn list_by_project<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<TimelineMilestone>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM timeline_milestones
             WHERE project_id = $1
             ORDER BY planned_date ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, TimelineMilestone>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Update a milestone. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<TimelineMilestone>, sqlx::Error> {
        let query = format!(
            "UPDATE timeline_milestones SET
                name = COALESCE($3, name),
                planned_date = COALESCE($4, planned_date),
                actual_date = COALESCE($5, actual_date),
                status = COALESCE($6, status)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimelineMilestone>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(input.planned_date)
            .bind(input.actual_date)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone by ID, scoped to its project.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM timeline_milestones WHERE id = $1 AND project_id = $2")
                .bind(id)
                .bind(project_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
