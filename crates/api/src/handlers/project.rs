//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::{Chain, ProjectStatus};
use fitout_core::types::DbId;
use fitout_db::models::project::{CreateProject, Project, UpdateProject};
use fitout_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireCoordinator};
use crate::state::AppState;

/// Reject vocabulary-violating chain / status strings before they hit the
/// database CHECK constraint.
fn validate_input(chain: Option<&str>, status: Option<&str>) -> AppResult<()> {
    if let Some(chain) = chain {
        if Chain::parse(chain).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown chain: {chain}"
            ))));
        }
    }
    if let Some(status) = status {
        if ProjectStatus::parse(status).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown project status: {status}"
            ))));
        }
    }
    Ok(())
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_input(Some(&input.chain), input.status.as_deref())?;

    let project = ProjectRepo::create(&state.pool, &input).await?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "project",
        Some(project.id),
        Some(serde_json::json!({ "name": project.name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_input(input.chain.as_deref(), input.status.as_deref())?;

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "project",
        Some(id),
        None,
    )
    .await;

    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "project",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

/// Request body for the admin progress override.
#[derive(Debug, Deserialize)]
pub struct OverrideProgress {
    pub progress: i32,
}

/// PUT /api/v1/projects/{id}/progress
///
/// Direct admin override of the derived `progress` field. The next
/// item/milestone mutation recomputes and replaces it.
pub async fn override_progress(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<OverrideProgress>,
) -> AppResult<Json<Project>> {
    if !(0..=100).contains(&input.progress) {
        return Err(AppError::Core(CoreError::Validation(
            "progress must be between 0 and 100".into(),
        )));
    }

    let updated = ProjectRepo::set_progress(&state.pool, id, input.progress).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    crate::audit::record(
        &state.pool,
        Some(admin.user_id),
        action_types::ENTITY_UPDATE,
        "project",
        Some(id),
        Some(serde_json::json!({ "progress_override": input.progress })),
    )
    .await;

    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}
