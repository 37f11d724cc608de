//! Timeline milestone entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `timeline_milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimelineMilestone {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub name: String,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    /// Defaults to `not_started` if omitted.
    pub status: Option<String>,
}

/// DTO for updating an existing milestone. All fields are optional.
///
/// `actual_date` may be set independently of `status`; the two are not
/// cross-validated.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMilestone {
    pub name: Option<String>,
    pub planned_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub status: Option<String>,
}
