//! Repository for the `drawings` table.

use sqlx::PgPool;

use fitout_core::types::DbId;

use crate::models::drawing::{CreateDrawing, Drawing};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, title, kind, file_url, width, height, uploaded_by, created_at";

/// Provides create/list/delete operations for drawings and site photos.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Insert a record for a stored upload, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDrawing) -> Result<Drawing, sqlx::Error> {
        let query = format!(
            "INSERT INTO drawings (project_id, title, kind, file_url, width, height, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(&input.kind)
            .bind(&input.file_url)
            .bind(input.width)
            .bind(input.height)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// Find a drawing by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Drawing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = $1");
        sqlx::query_as::<_, Drawing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drawings/photos of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Drawing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drawings WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Drawing>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a drawing by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drawings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
