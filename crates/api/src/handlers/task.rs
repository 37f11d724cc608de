//! Handlers for Kanban tasks, including the board move operation.
//!
//! Caller-supplied status strings are normalized through the single total
//! function in `fitout_core::taskboard` -- they are never rejected.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use fitout_core::audit::action_types;
use fitout_core::error::CoreError;
use fitout_core::status::TaskPriority;
use fitout_core::taskboard::{reorder_across, reorder_within, TaskStatus};
use fitout_core::types::DbId;
use fitout_db::models::task::{CreateTask, MoveTask, Task, UpdateTask};
use fitout_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Reject vocabulary-violating priority strings.
fn validate_priority(priority: Option<&str>) -> AppResult<()> {
    if let Some(priority) = priority {
        if TaskPriority::parse(priority).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown task priority: {priority}"
            ))));
        }
    }
    Ok(())
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    validate_priority(input.priority.as_deref())?;

    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    // Normalize whatever the caller sent; missing status means `todo`.
    let status = TaskStatus::normalize(input.status.as_deref().unwrap_or("todo"));

    let task = TaskRepo::create(&state.pool, project_id, status.as_str(), &input).await?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_CREATE,
        "task",
        Some(task.id),
        Some(serde_json::json!({ "project_id": project_id, "title": task.title })),
    )
    .await;

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT /api/v1/tasks/{id}
///
/// Edits title/description/priority/assignment. Status and position change
/// exclusively through the move endpoint.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    validate_priority(input.priority.as_deref())?;

    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "task",
        Some(id),
        None,
    )
    .await;

    Ok(Json(task))
}

/// POST /api/v1/tasks/{id}/move
///
/// Moves a task within its column or across columns. Both affected columns
/// end with dense 0-based `order_index` values; on a cross-column move the
/// task's status becomes the destination column's canonical value.
///
/// Each position update is persisted as an individual statement. A crash
/// mid-sequence can leave duplicate or gapped indices; the next successful
/// move of either column rewrites them densely.
pub async fn move_task(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<MoveTask>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;

    let to_status = TaskStatus::normalize(&input.to_status);
    let from_status = task.status.clone();

    let source_ids: Vec<DbId> = TaskRepo::list_column(&state.pool, task.project_id, &from_status)
        .await?
        .iter()
        .map(|t| t.id)
        .collect();

    let from_index = source_ids
        .iter()
        .position(|&tid| tid == id)
        .ok_or_else(|| AppError::InternalError("Task missing from its own column".into()))?;

    if to_status.as_str() == from_status {
        let new_order = reorder_within(&source_ids, from_index, input.to_index);
        persist_column(&state, &new_order, to_status.as_str()).await?;
    } else {
        let dest_ids: Vec<DbId> =
            TaskRepo::list_column(&state.pool, task.project_id, to_status.as_str())
                .await?
                .iter()
                .map(|t| t.id)
                .collect();

        let (new_source, new_dest) =
            reorder_across(&source_ids, &dest_ids, from_index, input.to_index);

        // Destination first so the moved task's status flips before the
        // source column is compacted.
        persist_column(&state, &new_dest, to_status.as_str()).await?;
        persist_column(&state, &new_source, &from_status).await?;
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_UPDATE,
        "task",
        Some(id),
        Some(serde_json::json!({
            "moved_to": to_status.as_str(),
            "to_index": input.to_index,
        })),
    )
    .await;

    let moved = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(moved))
}

/// Persist dense 0-based positions for every task in a column, one update
/// at a time.
async fn persist_column(state: &AppState, ordered_ids: &[DbId], status: &str) -> AppResult<()> {
    for (position, &task_id) in ordered_ids.iter().enumerate() {
        TaskRepo::set_position(&state.pool, task_id, status, position as i32).await?;
    }
    Ok(())
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }

    crate::audit::record(
        &state.pool,
        Some(user.user_id),
        action_types::ENTITY_DELETE,
        "task",
        Some(id),
        None,
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
