//! Repository for the `invoices` table.

use sqlx::PgPool;

use fitout_core::types::DbId;

use crate::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, company_id, invoice_number, amount, status, \
                       issue_date, file_url, notes, created_at, updated_at";

/// Provides CRUD operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new invoice under a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateInvoice,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (project_id, company_id, invoice_number, amount, status,
                                   issue_date, notes)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'pending'), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .bind(input.company_id)
            .bind(&input.invoice_number)
            .bind(input.amount)
            .bind(&input.status)
            .bind(input.issue_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all invoices of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update an invoice. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateInvoice,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                company_id = COALESCE($2, company_id),
                invoice_number = COALESCE($3, invoice_number),
                amount = COALESCE($4, amount),
                status = COALESCE($5, status),
                issue_date = COALESCE($6, issue_date),
                notes = COALESCE($7, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(input.company_id)
            .bind(&input.invoice_number)
            .bind(input.amount)
            .bind(&input.status)
            .bind(input.issue_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Attach the public URL of an uploaded invoice document.
    pub async fn set_file_url(
        pool: &PgPool,
        id: DbId,
        file_url: &str,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET file_url = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(file_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete an invoice by ID.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
