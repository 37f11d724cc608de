//! Kanban task-board status vocabulary and column ordering.
//!
//! Status normalization used to be duplicated across call sites in the
//! original application; here it is a single total function. The reorder
//! helpers are pure: they compute the resulting column orders and leave
//! persistence to the repository layer.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The four fixed task states. The database CHECK constraint accepts
/// exactly these strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Board columns in display order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    /// The canonical database string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    /// Total normalization of caller-supplied status strings.
    ///
    /// Canonical strings map to themselves. The legacy aliases
    /// `in-progress` and `in progress` map to [`TaskStatus::InProgress`].
    /// Everything else maps to [`TaskStatus::Todo`].
    pub fn normalize(input: &str) -> TaskStatus {
        match input {
            "todo" => TaskStatus::Todo,
            "in_progress" | "in-progress" | "in progress" => TaskStatus::InProgress,
            "review" => TaskStatus::Review,
            "done" => TaskStatus::Done,
            _ => TaskStatus::Todo,
        }
    }
}

/// Move a task within its column.
///
/// Removes the element at `from_index` and reinserts it at `to_index`
/// (clamped to the resulting length). The returned vector is the column's
/// new order; position equals the dense 0-based `order_index` to persist.
pub fn reorder_within(column: &[DbId], from_index: usize, to_index: usize) -> Vec<DbId> {
    let mut result = column.to_vec();
    if from_index >= result.len() {
        return result;
    }
    let moved = result.remove(from_index);
    let to = to_index.min(result.len());
    result.insert(to, moved);
    result
}

/// Move a task from one column into another.
///
/// Removes the element at `from_index` of `source` and inserts it into
/// `dest` at `to_index` (clamped). Returns the new `(source, dest)` orders;
/// both are dense and 0-based by position.
pub fn reorder_across(
    source: &[DbId],
    dest: &[DbId],
    from_index: usize,
    to_index: usize,
) -> (Vec<DbId>, Vec<DbId>) {
    let mut new_source = source.to_vec();
    let mut new_dest = dest.to_vec();
    if from_index >= new_source.len() {
        return (new_source, new_dest);
    }
    let moved = new_source.remove(from_index);
    let to = to_index.min(new_dest.len());
    new_dest.insert(to, moved);
    (new_source, new_dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Normalization
    // -----------------------------------------------------------------------

    #[test]
    fn canonical_strings_map_to_themselves() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::normalize(status.as_str()), status);
        }
    }

    #[test]
    fn hyphen_alias_normalizes_to_in_progress() {
        assert_eq!(TaskStatus::normalize("in-progress"), TaskStatus::InProgress);
    }

    #[test]
    fn space_alias_normalizes_to_in_progress() {
        assert_eq!(TaskStatus::normalize("in progress"), TaskStatus::InProgress);
    }

    #[test]
    fn unknown_strings_normalize_to_todo() {
        assert_eq!(TaskStatus::normalize(""), TaskStatus::Todo);
        assert_eq!(TaskStatus::normalize("doing"), TaskStatus::Todo);
        assert_eq!(TaskStatus::normalize("DONE"), TaskStatus::Todo);
        assert_eq!(TaskStatus::normalize("in_progress "), TaskStatus::Todo);
    }

    #[test]
    fn serde_round_trips_canonical_strings() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }

    // -----------------------------------------------------------------------
    // Reordering within a column
    // -----------------------------------------------------------------------

    #[test]
    fn move_forward_within_column() {
        let column = [10, 20, 30, 40];
        assert_eq!(reorder_within(&column, 0, 2), vec![20, 30, 10, 40]);
    }

    #[test]
    fn move_backward_within_column() {
        let column = [10, 20, 30, 40];
        assert_eq!(reorder_within(&column, 3, 0), vec![40, 10, 20, 30]);
    }

    #[test]
    fn move_to_same_position_is_identity() {
        let column = [10, 20, 30];
        assert_eq!(reorder_within(&column, 1, 1), vec![10, 20, 30]);
    }

    #[test]
    fn destination_index_is_clamped() {
        let column = [10, 20, 30];
        assert_eq!(reorder_within(&column, 0, 99), vec![20, 30, 10]);
    }

    #[test]
    fn out_of_range_source_is_a_no_op() {
        let column = [10, 20];
        assert_eq!(reorder_within(&column, 5, 0), vec![10, 20]);
    }

    // -----------------------------------------------------------------------
    // Reordering across columns
    // -----------------------------------------------------------------------

    #[test]
    fn move_across_columns() {
        let source = [10, 20, 30];
        let dest = [40, 50];
        let (new_source, new_dest) = reorder_across(&source, &dest, 1, 1);
        assert_eq!(new_source, vec![10, 30]);
        assert_eq!(new_dest, vec![40, 20, 50]);
    }

    #[test]
    fn move_into_empty_column() {
        let source = [10];
        let dest: [DbId; 0] = [];
        let (new_source, new_dest) = reorder_across(&source, &dest, 0, 0);
        assert!(new_source.is_empty());
        assert_eq!(new_dest, vec![10]);
    }

    #[test]
    fn across_destination_index_is_clamped() {
        let source = [10, 20];
        let dest = [30];
        let (new_source, new_dest) = reorder_across(&source, &dest, 0, 42);
        assert_eq!(new_source, vec![20]);
        assert_eq!(new_dest, vec![30, 10]);
    }
}
