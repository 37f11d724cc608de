//! Handlers for invoices, including the document upload.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::InvoiceStatus;
use fitout_core::types::DbId;
use fitout_db::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};
use fitout_db::repositories::{InvoiceRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::{self, BUCKET_INVOICES};

/// Reject vocabulary-violating status strings.
fn validate_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        if InvoiceStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown invoice status: {status}"
            ))));
        }
    }
    Ok(())
}

/// POST /api/v1/projects/{project_id}/invoices
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    validate_status(input.status.as_deref())?;

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let invoice = InvoiceRepo::create(&state.pool, project_id, &input).await?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "invoice",
        Some(invoice.id),
        Some(serde_json::json!({
            "project_id": project_id,
            "invoice_number": invoice.invoice_number,
        })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/projects/{project_id}/invoices
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    let invoice = InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;
    Ok(Json(invoice))
}

/// PUT /api/v1/invoices/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<Invoice>> {
    validate_status(input.status.as_deref())?;

    let invoice = InvoiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "invoice",
        Some(id),
        None,
    )
    .await;

    Ok(Json(invoice))
}

/// POST /api/v1/invoices/{id}/file
///
/// Accepts a multipart form with a required `file` field. Stores the
/// document in the invoices bucket and attaches its public URL.
pub async fn upload_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<Invoice>> {
    InvoiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    let form = uploads::read_multipart(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let file_url = uploads::store_file(&state.config, BUCKET_INVOICES, &file).await?;

    let invoice = InvoiceRepo::set_file_url(&state.pool, id, &file_url)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }))?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::FILE_UPLOAD,
        "invoice",
        Some(id),
        Some(serde_json::json!({ "file_url": file_url })),
    )
    .await;

    Ok(Json(invoice))
}

/// DELETE /api/v1/invoices/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InvoiceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Invoice",
            id,
        }));
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "invoice",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
