//! VisitorStatus enum for tracking the lifecycle of a visitor request.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a visitor request.
///
/// `Pending` is the only initial state; `Approved` and `Denied` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VisitorStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

impl VisitorStatus {
    /// Returns true if the request still awaits a resident decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, VisitorStatus::Pending)
    }

    /// Returns true if this status represents a resident decision.
    pub fn is_resolution(&self) -> bool {
        matches!(self, VisitorStatus::Approved | VisitorStatus::Denied)
    }
}

impl StateMachine for VisitorStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use VisitorStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Denied))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VisitorStatus::*;
        match self {
            Pending => vec![Approved, Denied],
            Approved | Denied => vec![],
        }
    }
}

impl fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VisitorStatus::Pending => "Pending",
            VisitorStatus::Approved => "Approved",
            VisitorStatus::Denied => "Denied",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_pending() {
        assert_eq!(VisitorStatus::default(), VisitorStatus::Pending);
    }

    #[test]
    fn pending_can_transition_to_both_resolutions() {
        assert!(VisitorStatus::Pending.can_transition_to(&VisitorStatus::Approved));
        assert!(VisitorStatus::Pending.can_transition_to(&VisitorStatus::Denied));
    }

    #[test]
    fn pending_cannot_transition_to_pending() {
        assert!(!VisitorStatus::Pending.can_transition_to(&VisitorStatus::Pending));
    }

    #[test]
    fn resolutions_are_terminal() {
        assert!(VisitorStatus::Approved.is_terminal());
        assert!(VisitorStatus::Denied.is_terminal());
        assert!(!VisitorStatus::Pending.is_terminal());
    }

    #[test]
    fn is_resolution_matches_terminal_states() {
        assert!(VisitorStatus::Approved.is_resolution());
        assert!(VisitorStatus::Denied.is_resolution());
        assert!(!VisitorStatus::Pending.is_resolution());
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", VisitorStatus::Pending), "Pending");
        assert_eq!(format!("{}", VisitorStatus::Approved), "Approved");
        assert_eq!(format!("{}", VisitorStatus::Denied), "Denied");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&VisitorStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&VisitorStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&VisitorStatus::Denied).unwrap(),
            "\"denied\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: VisitorStatus = serde_json::from_str("\"denied\"").unwrap();
        assert_eq!(status, VisitorStatus::Denied);
    }

    fn any_status() -> impl Strategy<Value = VisitorStatus> {
        prop_oneof![
            Just(VisitorStatus::Pending),
            Just(VisitorStatus::Approved),
            Just(VisitorStatus::Denied),
        ]
    }

    proptest! {
        // Terminality law: once status leaves Pending, no further transition
        // is accepted, whatever the target.
        #[test]
        fn no_transition_leaves_a_terminal_state(
            from in any_status(),
            to in any_status(),
        ) {
            if from.is_resolution() {
                prop_assert!(!from.can_transition_to(&to));
                prop_assert!(from.transition_to(to).is_err());
            }
        }

        // Only Pending has outgoing transitions, and only to resolutions.
        #[test]
        fn every_valid_transition_starts_pending_and_resolves(
            from in any_status(),
            to in any_status(),
        ) {
            if from.can_transition_to(&to) {
                prop_assert_eq!(from, VisitorStatus::Pending);
                prop_assert!(to.is_resolution());
            }
        }
    }
}
