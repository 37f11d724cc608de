//! Handlers for admin user management. All endpoints require the admin role.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::roles::{ROLE_ADMIN, ROLE_CONTRACTOR, ROLE_COORDINATOR};
use fitout_core::types::DbId;
use fitout_db::models::user::{CreateUser, InsertUser, PublicUser, UpdateUser};
use fitout_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Reject unknown role names.
fn validate_role(role: &str) -> AppResult<()> {
    if role != ROLE_ADMIN && role != ROLE_COORDINATOR && role != ROLE_CONTRACTOR {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role: {role}"
        ))));
    }
    Ok(())
}

/// POST /api/v1/admin/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    let role = input.role.clone().unwrap_or_else(|| ROLE_COORDINATOR.to_string());
    validate_role(&role)?;

    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let insert = InsertUser {
        username: input.username,
        email: input.email,
        password_hash,
        role,
    };
    let user = UserRepo::create(&state.pool, &insert).await?;

    crate::audit::record(
        &state.pool,
        Some(admin.user_id),
        action_types::ENTITY_CREATE,
        "user",
        Some(user.id),
        Some(serde_json::json!({ "username": user.username, "role": user.role })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/admin/users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<PublicUser>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<PublicUser>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<PublicUser>> {
    if let Some(ref role) = input.role {
        validate_role(role)?;
    }

    let password_hash = match &input.password {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LENGTH)
                .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let user = UserRepo::update_profile(
        &state.pool,
        id,
        input.email.as_deref(),
        input.role.as_deref(),
        input.is_active,
        password_hash.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    // Deactivation or password change invalidates open sessions.
    if input.is_active == Some(false) || password_hash.is_some() {
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    crate::audit::record(
        &state.pool,
        Some(admin.user_id),
        action_types::ENTITY_UPDATE,
        "user",
        Some(id),
        None,
    )
    .await;

    Ok(Json(user.into()))
}

/// DELETE /api/v1/admin/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot delete your own account".into(),
        )));
    }

    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    crate::audit::record(
        &state.pool,
        Some(admin.user_id),
        action_types::ENTITY_DELETE,
        "user",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
