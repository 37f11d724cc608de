//! Project item entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `project_items` table.
///
/// `status` is authoritative for owner-scope items; `completion_percentage`
/// for contractor-scope items. The other field is carried but ignored by
/// the progress aggregation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectItem {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub scope: String,
    pub status: String,
    pub completion_percentage: i32,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub lpo_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectItem {
    pub name: String,
    pub category: Option<String>,
    pub scope: String,
    /// Defaults to `not_ordered` if omitted.
    pub status: Option<String>,
    /// Defaults to 0 if omitted.
    pub completion_percentage: Option<i32>,
    pub company: Option<String>,
    pub notes: Option<String>,
    /// Defaults to `na` if omitted.
    pub lpo_status: Option<String>,
}

/// DTO for updating an existing project item. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectItem {
    pub name: Option<String>,
    pub category: Option<String>,
    pub scope: Option<String>,
    pub status: Option<String>,
    pub completion_percentage: Option<i32>,
    pub company: Option<String>,
    pub notes: Option<String>,
    pub lpo_status: Option<String>,
}
