//! Invoice entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use fitout_core::types::{DbId, Timestamp};

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub company_id: Option<DbId>,
    pub invoice_number: String,
    pub amount: f64,
    pub status: String,
    pub issue_date: Option<NaiveDate>,
    /// Public URL of the uploaded invoice document, if any.
    pub file_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub company_id: Option<DbId>,
    pub invoice_number: String,
    pub amount: f64,
    /// Defaults to `pending` if omitted.
    pub status: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for updating an existing invoice. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoice {
    pub company_id: Option<DbId>,
    pub invoice_number: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
