//! Project progress recompute service.
//!
//! Invoked after every item/milestone mutation. Reads the project's items
//! and milestones, scores them via `fitout_core::progress`, and writes the
//! aggregate onto `projects.progress`. The read-compute-write sequence runs
//! in a single transaction so a concurrent item edit cannot slip between
//! the reads and the write.
//!
//! Failure policy: errors are never propagated to the caller. Any failure
//! is logged and the project is best-effort written with 0, so a stored 0
//! is NOT a reliable "project has no work" signal.

use sqlx::PgPool;

use fitout_core::progress::{aggregate, item_score, milestone_score};
use fitout_core::status::{ItemScope, ItemStatus, MilestoneStatus};
use fitout_core::types::DbId;
use fitout_db::models::item::ProjectItem;
use fitout_db::models::milestone::TimelineMilestone;
use fitout_db::repositories::{ItemRepo, MilestoneRepo, ProjectRepo};

/// Score one item row. Rows with a vocabulary-violating status (impossible
/// under the CHECK constraint) score 0.
fn score_item(item: &ProjectItem) -> u32 {
    let scope = ItemScope::parse(&item.scope).unwrap_or(ItemScope::Owner);
    let status = ItemStatus::parse(&item.status).unwrap_or(ItemStatus::NotOrdered);
    item_score(scope, status, item.completion_percentage)
}

/// Score one milestone row.
fn score_milestone(milestone: &TimelineMilestone) -> u32 {
    let status = MilestoneStatus::parse(&milestone.status).unwrap_or(MilestoneStatus::NotStarted);
    milestone_score(status)
}

/// Recompute and persist a project's progress, returning the stored value.
pub async fn recompute_project_progress(pool: &PgPool, project_id: DbId) -> i32 {
    match recompute_in_transaction(pool, project_id).await {
        Ok(progress) => progress,
        Err(e) => {
            tracing::warn!(
                project_id,
                error = %e,
                "Progress recompute failed, falling back to 0",
            );
            // Best-effort write of the fallback value.
            if let Err(e) = ProjectRepo::set_progress(pool, project_id, 0).await {
                tracing::warn!(project_id, error = %e, "Failed to store fallback progress");
            }
            0
        }
    }
}

/// The transactional read-compute-write sequence.
async fn recompute_in_transaction(pool: &PgPool, project_id: DbId) -> Result<i32, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let items = ItemRepo::list_by_project(&mut *tx, project_id).await?;
    let milestones = MilestoneRepo::list_by_project(&mut *tx, project_id).await?;

    let scores: Vec<u32> = items
        .iter()
        .map(score_item)
        .chain(milestones.iter().map(score_milestone))
        .collect();
    let progress = aggregate(&scores);

    ProjectRepo::set_progress(&mut *tx, project_id, progress).await?;
    tx.commit().await?;

    Ok(progress)
}
