//! Handlers for the `/projects/{project_id}/items` resource.
//!
//! Every mutation triggers a recompute of the parent project's progress.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::{ItemScope, ItemStatus, LpoStatus};
use fitout_core::types::DbId;
use fitout_db::models::item::{CreateProjectItem, ProjectItem, UpdateProjectItem};
use fitout_db::repositories::{ItemRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::progress::recompute_project_progress;
use crate::state::AppState;

/// Reject vocabulary-violating strings before they hit the database CHECK
/// constraints.
fn validate_input(
    scope: Option<&str>,
    status: Option<&str>,
    lpo_status: Option<&str>,
    completion_percentage: Option<i32>,
) -> AppResult<()> {
    if let Some(scope) = scope {
        if ItemScope::parse(scope).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown item scope: {scope}"
            ))));
        }
    }
    if let Some(status) = status {
        if ItemStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown item status: {status}"
            ))));
        }
    }
    if let Some(lpo) = lpo_status {
        if LpoStatus::parse(lpo).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown LPO status: {lpo}"
            ))));
        }
    }
    if let Some(pct) = completion_percentage {
        if !(0..=100).contains(&pct) {
            return Err(AppError::Core(CoreError::Validation(
                "completion_percentage must be between 0 and 100".into(),
            )));
        }
    }
    Ok(())
}

/// Return NotFound unless the project exists.
async fn ensure_project_exists(state: &AppState, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;
    Ok(())
}

/// POST /api/v1/projects/{project_id}/items
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectItem>,
) -> AppResult<(StatusCode, Json<ProjectItem>)> {
    validate_input(
        Some(&input.scope),
        input.status.as_deref(),
        input.lpo_status.as_deref(),
        input.completion_percentage,
    )?;
    ensure_project_exists(&state, project_id).await?;

    let item = ItemRepo::create(&state.pool, project_id, &input).await?;
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "project_item",
        Some(item.id),
        Some(serde_json::json!({ "project_id": project_id, "name": item.name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /api/v1/projects/{project_id}/items
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectItem>>> {
    let items = ItemRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(items))
}

/// GET /api/v1/projects/{project_id}/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ProjectItem>> {
    let item = ItemRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectItem",
            id,
        }))?;
    Ok(Json(item))
}

/// PUT /api/v1/projects/{project_id}/items/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectItem>,
) -> AppResult<Json<ProjectItem>> {
    validate_input(
        input.scope.as_deref(),
        input.status.as_deref(),
        input.lpo_status.as_deref(),
        input.completion_percentage,
    )?;

    let item = ItemRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectItem",
            id,
        }))?;
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "project_item",
        Some(id),
        None,
    )
    .await;

    Ok(Json(item))
}

/// DELETE /api/v1/projects/{project_id}/items/{id}
///
/// The deleted item is excluded from both numerator and denominator of the
/// subsequent progress recompute.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = ItemRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ProjectItem",
            id,
        }));
    }
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "project_item",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
