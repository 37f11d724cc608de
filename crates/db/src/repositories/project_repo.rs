//! Repository for the `projects` table.

use sqlx::postgres::Postgres;
use sqlx::{Executor, PgPool};

use fitout_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, location, main_contractor, chain, status, progress, \
                       start_date, end_date, notes, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `not_started`.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, location, main_contractor, chain, status,
                                   start_date, end_date, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'not_started'), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.main_contractor)
            .bind(&input.chain)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                location = COALESCE($3, location),
                main_contractor = COALESCE($4, main_contractor),
                chain = COALESCE($5, chain),
                status = COALESCE($6, status),
                start_date = COALESCE($7, start_date),
                end_date = COALESCE($8, end_date),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.location)
            .bind(&input.main_contractor)
            .bind(&input.chain)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Write the derived `progress` value onto a project.
    ///
    /// Generic over the executor so the recompute service can run it inside
    /// the same transaction as the item/milestone reads.
    pub async fn set_progress<'e, E>(
        executor: E,
        id: DbId,
        progress: i32,
    ) -> Result<bool, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("UPDATE projects SET progress = $2 WHERE id = $1")
            .bind(id)
            .bind(progress)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a project by ID. Child items, milestones, tasks, invoices,
    /// and drawings are removed by `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
