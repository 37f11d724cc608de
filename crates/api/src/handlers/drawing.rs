//! Handlers for drawings and site photos (multipart uploads).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::DrawingKind;
use fitout_core::types::DbId;
use fitout_db::models::drawing::{CreateDrawing, Drawing};
use fitout_db::repositories::{DrawingRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::uploads::{self, BUCKET_DRAWINGS, BUCKET_PHOTOS};

/// POST /api/v1/projects/{project_id}/drawings
///
/// Multipart form: required `file` and `title` fields, optional `kind`
/// (`drawing` or `photo`, defaults to `drawing`). Image dimensions are read
/// from the file header when possible.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Drawing>)> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let form = uploads::read_multipart(multipart).await?;
    let file = form
        .file
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let title = form
        .field("title")
        .ok_or_else(|| AppError::BadRequest("Missing required 'title' field".into()))?
        .to_string();

    let kind = match form.field("kind") {
        Some(raw) => DrawingKind::parse(raw).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!("Unknown drawing kind: {raw}")))
        })?,
        None => DrawingKind::Drawing,
    };

    let bucket = match kind {
        DrawingKind::Drawing => BUCKET_DRAWINGS,
        DrawingKind::Photo => BUCKET_PHOTOS,
    };
    let file_url = uploads::store_file(&state.config, bucket, &file).await?;
    let dimensions = uploads::image_dimensions(&file.data);

    let input = CreateDrawing {
        project_id,
        title,
        kind: kind.as_str().to_string(),
        file_url,
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
        uploaded_by: Some(user.user_id),
    };
    let drawing = DrawingRepo::create(&state.pool, &input).await?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::FILE_UPLOAD,
        "drawing",
        Some(drawing.id),
        Some(serde_json::json!({
            "project_id": project_id,
            "file_url": drawing.file_url,
        })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(drawing)))
}

/// GET /api/v1/projects/{project_id}/drawings
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Drawing>>> {
    let drawings = DrawingRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(drawings))
}

/// GET /api/v1/drawings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Drawing>> {
    let drawing = DrawingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id,
        }))?;
    Ok(Json(drawing))
}

/// DELETE /api/v1/drawings/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DrawingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Drawing",
            id,
        }));
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "drawing",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
