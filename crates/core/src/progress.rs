//! Project progress aggregation.
//!
//! Maps the current item and milestone sets of a project to a single 0-100
//! integer. Every milestone and every item contributes an equal weight to
//! the denominator; the result is the rounded (half up) average of the
//! per-entity scores. The functions here are pure -- fetching the entities
//! and persisting the result onto the project row is the caller's job.

use crate::status::{ItemScope, ItemStatus, MilestoneStatus};

/// Per-milestone score by status.
pub fn milestone_score(status: MilestoneStatus) -> u32 {
    match status {
        MilestoneStatus::NotStarted => 0,
        MilestoneStatus::InProgress => 50,
        MilestoneStatus::Completed => 100,
        MilestoneStatus::Delayed => 25,
    }
}

/// Per-item score for owner-scope items, by order status.
pub fn owner_item_score(status: ItemStatus) -> u32 {
    match status {
        ItemStatus::NotOrdered => 0,
        ItemStatus::Ordered => 30,
        ItemStatus::PartiallyOrdered => 50,
        ItemStatus::Delivered => 75,
        ItemStatus::Installed => 100,
    }
}

/// Per-item score, selecting the authoritative source by scope.
///
/// Owner-scope items are scored from their order status; contractor-scope
/// items use their `completion_percentage` directly, clamped to 0-100.
pub fn item_score(scope: ItemScope, status: ItemStatus, completion_percentage: i32) -> u32 {
    match scope {
        ItemScope::Owner => owner_item_score(status),
        ItemScope::Contractor => completion_percentage.clamp(0, 100) as u32,
    }
}

/// Aggregate per-entity scores into a single 0-100 integer.
///
/// Empty input yields 0. Rounding is half up: an average of 62.5 becomes 63.
pub fn aggregate(scores: &[u32]) -> i32 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().sum();
    let avg = f64::from(sum) / scores.len() as f64;
    // Half away from zero equals half up for non-negative averages.
    avg.round() as i32
}
