//! Drawing / site-photo entity model.

use serde::Serialize;
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `drawings` table. Created by the multipart upload
/// handler; there is no update path, only delete.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Drawing {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub kind: String,
    pub file_url: String,
    /// Pixel dimensions extracted from the image header, when readable.
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// Insert parameters for a stored upload.
#[derive(Debug, Clone)]
pub struct CreateDrawing {
    pub project_id: DbId,
    pub title: String,
    pub kind: String,
    pub file_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
}
