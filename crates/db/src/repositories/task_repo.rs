//! Repository for the `tasks` table.

use sqlx::PgPool;

use fitout_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, priority, status, order_index, \
                       assigned_to, due_date, created_at, updated_at";

/// Provides CRUD and ordering operations for Kanban tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task at the end of the given column.
    ///
    /// `status` must already be normalized to a canonical value; the
    /// order index is one past the current maximum in that column.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        status: &str,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (project_id, title, description, priority, status,
                                order_index, assigned_to, due_date)
             SELECT $1, $2, $3, COALESCE($4, 'medium'), $5,
                    COALESCE(MAX(order_index) + 1, 0), $6, $7
             FROM tasks WHERE project_id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(status)
            .bind(input.assigned_to)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks of a project, grouped by column order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1
             ORDER BY status, order_index, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// List one status column of a project's board in display order.
    pub async fn list_column(
        pool: &PgPool,
        project_id: DbId,
        status: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE project_id = $1 AND status = $2
             ORDER BY order_index, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update a task's editable fields. Only non-`None` fields are applied;
    /// `status` and `order_index` change exclusively through the move
    /// operation.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                assigned_to = COALESCE($5, assigned_to),
                due_date = COALESCE($6, due_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.assigned_to)
            .bind(input.due_date)
            .fetch_optional(pool)
            .await
    }

    /// Persist one task's column position (status + order index).
    ///
    /// The move operation calls this once per affected task; updates are
    /// not wrapped in a transaction.
    pub async fn set_position(
        pool: &PgPool,
        id: DbId,
        status: &str,
        order_index: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE tasks SET status = $2, order_index = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(order_index)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a task by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
