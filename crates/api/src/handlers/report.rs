//! Project report assembly.
//!
//! Emits the data the external PDF renderer consumes: project header,
//! current progress, items grouped by scope, milestones ordered by planned
//! date, and open tasks with high priority first.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use fitout_core::error::CoreError;
use fitout_core::status::TaskPriority;
use fitout_core::taskboard::TaskStatus;
use fitout_core::types::DbId;
use fitout_db::models::item::ProjectItem;
use fitout_db::models::milestone::TimelineMilestone;
use fitout_db::models::project::Project;
use fitout_db::models::task::Task;
use fitout_db::repositories::{ItemRepo, MilestoneRepo, ProjectRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The assembled report payload.
#[derive(Debug, Serialize)]
pub struct ProjectReport {
    pub project: Project,
    pub owner_items: Vec<ProjectItem>,
    pub contractor_items: Vec<ProjectItem>,
    /// Ordered by planned date, earliest first.
    pub milestones: Vec<TimelineMilestone>,
    /// Open (not done) tasks, high priority first.
    pub open_tasks: Vec<Task>,
}

/// Sort key for report task ordering: high before medium before low.
fn priority_rank(priority: &str) -> u8 {
    match TaskPriority::parse(priority) {
        Some(TaskPriority::High) => 0,
        Some(TaskPriority::Medium) => 1,
        Some(TaskPriority::Low) => 2,
        None => 3,
    }
}

/// GET /api/v1/projects/{id}/report
pub async fn project_report(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectReport>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let items = ItemRepo::list_by_project(&state.pool, id).await?;
    let milestones = MilestoneRepo::list_by_project(&state.pool, id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, id).await?;

    let (owner_items, contractor_items): (Vec<_>, Vec<_>) =
        items.into_iter().partition(|i| i.scope == "owner");

    let mut open_tasks: Vec<Task> = tasks
        .into_iter()
        .filter(|t| t.status != TaskStatus::Done.as_str())
        .collect();
    open_tasks.sort_by_key(|t| priority_rank(&t.priority));

    Ok(Json(ProjectReport {
        project,
        owner_items,
        contractor_items,
        milestones,
        open_tasks,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_priority_sorts_first() {
        assert!(priority_rank("high") < priority_rank("medium"));
        assert!(priority_rank("medium") < priority_rank("low"));
        assert!(priority_rank("low") < priority_rank("nonsense"));
    }
}
