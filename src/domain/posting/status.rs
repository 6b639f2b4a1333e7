//! Posting status state machine.
//!
//! Every edge a posting may take through its lifecycle is listed here; the
//! aggregate consults this table before changing status.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    /// Being prepared by the sponsor. Only drafts can be edited.
    #[default]
    Draft,

    /// Published and accepting applications.
    Open,

    /// No longer accepting applications (manual close, expiry, or ceiling).
    Closed,

    /// A candidate was hired.
    Filled,

    /// Withdrawn by the sponsor.
    Cancelled,
}

impl PostingStatus {
    /// Only drafts accept detail or compensation edits.
    pub fn can_edit(&self) -> bool {
        self.is_draft()
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, PostingStatus::Draft)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PostingStatus::Open)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, PostingStatus::Closed)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, PostingStatus::Filled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, PostingStatus::Cancelled)
    }

    /// Lower-case wire name, as used in search criteria and event payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostingStatus::Draft => "draft",
            PostingStatus::Open => "open",
            PostingStatus::Closed => "closed",
            PostingStatus::Filled => "filled",
            PostingStatus::Cancelled => "cancelled",
        }
    }
}

impl StateMachine for PostingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PostingStatus::*;
        matches!(
            (self, target),
            (Draft, Open)
                | (Draft, Closed)
                | (Draft, Cancelled)
                | (Open, Closed)
                | (Open, Filled)
                | (Open, Cancelled)
                | (Closed, Cancelled)
                | (Cancelled, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PostingStatus::*;
        match self {
            Draft => vec![Open, Closed, Cancelled],
            Open => vec![Closed, Filled, Cancelled],
            Closed => vec![Cancelled],
            Cancelled => vec![Closed],
            Filled => vec![],
        }
    }
}

impl fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [PostingStatus; 5] = [
        PostingStatus::Draft,
        PostingStatus::Open,
        PostingStatus::Closed,
        PostingStatus::Filled,
        PostingStatus::Cancelled,
    ];

    #[test]
    fn default_is_draft() {
        assert_eq!(PostingStatus::default(), PostingStatus::Draft);
    }

    #[test]
    fn only_draft_can_edit() {
        for status in ALL {
            assert_eq!(status.can_edit(), status == PostingStatus::Draft);
        }
    }

    #[test]
    fn draft_publishes_to_open() {
        assert_eq!(
            PostingStatus::Draft.transition_to(PostingStatus::Open),
            Ok(PostingStatus::Open)
        );
    }

    #[test]
    fn closed_cannot_reopen() {
        assert!(PostingStatus::Closed
            .transition_to(PostingStatus::Open)
            .is_err());
    }

    #[test]
    fn filled_is_terminal() {
        assert!(PostingStatus::Filled.is_terminal());
        assert!(!PostingStatus::Filled.can_transition_to(&PostingStatus::Cancelled));
    }

    #[test]
    fn only_open_can_be_filled() {
        for status in ALL {
            assert_eq!(
                status.can_transition_to(&PostingStatus::Filled),
                status == PostingStatus::Open
            );
        }
    }

    #[test]
    fn no_self_transitions() {
        for status in ALL {
            assert!(!status.can_transition_to(&status));
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&PostingStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let status: PostingStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(status, PostingStatus::Open);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(PostingStatus::Filled.to_string(), "filled");
    }
}
