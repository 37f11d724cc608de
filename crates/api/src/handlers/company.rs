//! Handlers for the `/companies` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::types::DbId;
use fitout_db::models::company::{Company, CreateCompany, UpdateCompany};
use fitout_db::repositories::CompanyRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireCoordinator;
use crate::state::AppState;

/// POST /api/v1/companies
pub async fn create(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Json(input): Json<CreateCompany>,
) -> AppResult<(StatusCode, Json<Company>)> {
    let company = CompanyRepo::create(&state.pool, &input).await?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "company",
        Some(company.id),
        Some(serde_json::json!({ "name": company.name })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(company)))
}

/// GET /api/v1/companies
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<Json<Vec<Company>>> {
    let companies = CompanyRepo::list(&state.pool).await?;
    Ok(Json(companies))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;
    Ok(Json(company))
}

/// PUT /api/v1/companies/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompany>,
) -> AppResult<Json<Company>> {
    let company = CompanyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }))?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "company",
        Some(id),
        None,
    )
    .await;

    Ok(Json(company))
}

/// DELETE /api/v1/companies/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCoordinator(user): RequireCoordinator,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CompanyRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Company",
            id,
        }));
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "company",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
