//! Kanban task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    /// Position within the task's status column, dense and 0-based after
    /// every successful move.
    pub order_index: i32,
    pub assigned_to: Option<DbId>,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<String>,
    /// Normalized via the task-board vocabulary; defaults to `todo`.
    pub status: Option<String>,
    pub assigned_to: Option<DbId>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for updating an existing task. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<DbId>,
    pub due_date: Option<NaiveDate>,
}

/// DTO for `POST /tasks/{id}/move`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveTask {
    /// Destination column; normalized via the task-board vocabulary.
    pub to_status: String,
    /// Destination position within the column, clamped to the column length.
    pub to_index: usize,
}
