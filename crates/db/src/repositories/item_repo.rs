//! Repository for the `project_items` table.

use sqlx::postgres::Postgres;
use sqlx::{Executor, PgPool};

use fitout_core::types::DbId;

use crate::models::item::{CreateProjectItem, ProjectItem, UpdateProjectItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, category, scope, status, completion_percentage, \
                       company, notes, lpo_status, created_at, updated_at";

/// Provides CRUD operations for project items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item under a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateProjectItem,
    ) -> Result<ProjectItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_items
                (project_id, name, category, scope, status, completion_percentage,
                 company, notes, lpo_status)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'not_ordered'), COALESCE($6, 0),
                     $7, $8, COALESCE($9, 'na'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectItem>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.scope)
            .bind(&input.status)
            .bind(input.completion_percentage)
            .bind(&input.company)
            .bind(&input.notes)
            .bind(&input.lpo_status)
            .fetch_one(pool)
            .await
    }

    /// Find an item by ID, scoped to its project.
    pub async fn find_by_id(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
    ) -> Result<Option<ProjectItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM project_items WHERE id = $1 AND project_id = $2");
        sqlx::query_as::<_, ProjectItem>(&query)
            .bind(id)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }

    /// List all items of a project, most recently created first.
    ///
    /// Generic over the executor so the progress recompute can read inside
    /// its transaction.
    pub async fn list_by_project<'e, E>(
        executor: E,
        project_id: DbId,
    ) -> Result<Vec<ProjectItem>, sqlx::Error>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM project_items WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectItem>(&query)
            .bind(project_id)
            .fetch_all(executor)
            .await
    }

    /// Update an item. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateProjectItem,
    ) -> Result<Option<ProjectItem>, sqlx::Error> {
        let query = format!(
            "UPDATE project_items SET
                name = COALESCE($3, name),
                category = COALESCE($4, category),
                scope = COALESCE($5, scope),
                status = COALESCE($6, status),
                completion_percentage = COALESCE($7, completion_percentage),
                company = COALESCE($8, company),
                notes = COALESCE($9, notes),
                lpo_status = COALESCE($10, lpo_status)
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectItem>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.scope)
            .bind(&input.status)
            .bind(input.completion_percentage)
            .bind(&input.company)
            .bind(&input.notes)
            .bind(&input.lpo_status)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item by ID, scoped to its project.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_items WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
