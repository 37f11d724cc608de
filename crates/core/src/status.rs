//! Status vocabularies for the main entities.
//!
//! Each enum maps 1:1 to the canonical snake_case strings stored in the
//! database (TEXT columns with CHECK constraints). The `parse` functions are
//! strict: unknown input is rejected so handlers can return a validation
//! error. Task statuses are the exception -- they are normalized, never
//! rejected -- and live in [`crate::taskboard`].

use serde::{Deserialize, Serialize};

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The canonical database string for this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }

            /// Parse the canonical string form. Returns `None` for anything
            /// outside the vocabulary.
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $text => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Every member of the vocabulary, in declaration order.
            pub const ALL: &'static [$name] = &[ $( Self::$variant ),+ ];
        }
    };
}

define_status_enum! {
    /// Project lifecycle status.
    ProjectStatus {
        NotStarted = "not_started",
        InProgress = "in_progress",
        OnHold = "on_hold",
        Delayed = "delayed",
        Completed = "completed",
    }
}

define_status_enum! {
    /// Restaurant chain a project belongs to.
    Chain {
        Bk = "bk",
        Tc = "tc",
    }
}

define_status_enum! {
    /// Who owns a project item's progress: the project owner (discrete
    /// order-status tracking) or the contractor (completion percentage).
    ItemScope {
        Owner = "owner",
        Contractor = "contractor",
    }
}

define_status_enum! {
    /// Procurement status for owner-scope items. Meaningless for
    /// contractor-scope items, whose `completion_percentage` is
    /// authoritative instead.
    ItemStatus {
        NotOrdered = "not_ordered",
        Ordered = "ordered",
        PartiallyOrdered = "partially_ordered",
        Delivered = "delivered",
        Installed = "installed",
    }
}

define_status_enum! {
    /// Local Purchase Order status, tracked per owner-scope item.
    LpoStatus {
        LpoReceived = "lpo_received",
        LpoPending = "lpo_pending",
        Na = "na",
    }
}

define_status_enum! {
    /// Timeline milestone status. `actual_date` is not coupled to
    /// `Completed`; the two fields vary independently.
    MilestoneStatus {
        NotStarted = "not_started",
        InProgress = "in_progress",
        Completed = "completed",
        Delayed = "delayed",
    }
}

define_status_enum! {
    /// Kanban task priority.
    TaskPriority {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

define_status_enum! {
    /// Invoice payment status.
    InvoiceStatus {
        Pending = "pending",
        Approved = "approved",
        Paid = "paid",
    }
}

define_status_enum! {
    /// Whether an uploaded file is a technical drawing or a site photo.
    DrawingKind {
        Drawing = "drawing",
        Photo = "photo",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_project_status() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn parse_round_trips_every_item_status() {
        for status in ItemStatus::ALL {
            assert_eq!(ItemStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn parse_round_trips_every_milestone_status() {
        for status in MilestoneStatus::ALL {
            assert_eq!(MilestoneStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn parse_rejects_unknown_strings() {
        assert_eq!(ProjectStatus::parse("cancelled"), None);
        assert_eq!(ItemStatus::parse(""), None);
        assert_eq!(ItemScope::parse("Owner"), None); // case-sensitive
        assert_eq!(LpoStatus::parse("n/a"), None);
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&ItemStatus::PartiallyOrdered).unwrap();
        assert_eq!(json, "\"partially_ordered\"");
        let back: ItemStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ItemStatus::PartiallyOrdered);
    }

    #[test]
    fn chain_vocabulary_is_exactly_two() {
        assert_eq!(Chain::ALL.len(), 2);
        assert_eq!(Chain::Bk.as_str(), "bk");
        assert_eq!(Chain::Tc.as_str(), "tc");
    }
}
