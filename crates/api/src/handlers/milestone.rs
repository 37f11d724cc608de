//! Handlers for the `/projects/{project_id}/milestones` resource.
//!
//! Every mutation triggers a recompute of the parent project's progress.
//! `actual_date` and `status` are not cross-validated.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::MilestoneStatus;
use fitout_core::types::DbId;
use fitout_db::models::milestone::{CreateMilestone, TimelineMilestone, UpdateMilestone};
use fitout_db::repositories::{MilestoneRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::progress::recompute_project_progress;
use crate::state::AppState;

/// Reject vocabulary-violating status strings.
fn validate_status(status: Option<&str>) -> AppResult<()> {
    if let Some(status) = status {
        if MilestoneStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown milestone status: {status}"
            ))));
        }
    }
    Ok(())
}

/// POST /api/v1/projects/{project_id}/milestones
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<TimelineMilestone>)> {
    validate_status(input.status.as_deref())?;

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let milestone = MilestoneRepo::create(&state.pool, project_id, &input).await?;
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "timeline_milestone",
        Some(milestone.id),
        Some(serde_json::json!({ "project_id": project_id, "name": milestone.name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(milestone)))
}

/// GET /api/v1/projects/{project_id}/milestones
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<TimelineMilestone>>> {
    let milestones = MilestoneRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(milestones))
}

/// GET /api/v1/projects/{project_id}/milestones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<TimelineMilestone>> {
    let milestone = MilestoneRepo::find_by_id(&state.pool, project_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimelineMilestone",
            id,
        }))?;
    Ok(Json(milestone))
}

/// PUT /api/v1/projects/{project_id}/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<TimelineMilestone>> {
    validate_status(input.status.as_deref())?;

    let milestone = MilestoneRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TimelineMilestone",
            id,
        }))?;
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "timeline_milestone",
        Some(id),
        None,
    )
    .await;

    Ok(Json(milestone))
}

/// DELETE /api/v1/projects/{project_id}/milestones/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let deleted = MilestoneRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TimelineMilestone",
            id,
        }));
    }
    recompute_project_progress(&state.pool, project_id).await;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "timeline_milestone",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
