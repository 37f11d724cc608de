//! Project entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
///
/// `progress` is derived: the recompute service writes it after every
/// item/milestone mutation. It is never edited directly in normal flow
/// (admins may override it).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub location: Option<String>,
    pub main_contractor: Option<String>,
    pub chain: String,
    pub status: String,
    pub progress: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub location: Option<String>,
    pub main_contractor: Option<String>,
    pub chain: String,
    /// Defaults to `not_started` if omitted.
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub location: Option<String>,
    pub main_contractor: Option<String>,
    pub chain: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
