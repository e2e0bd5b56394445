//! State machine trait for status enums.
//!
//! Provides a consistent interface for validating and performing state
//! transitions on entity lifecycle statuses.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for VisitorStatus {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Pending, Approved) | (Pending, Denied))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Pending => vec![Approved, Denied],
///             Approved | Denied => vec![],
///         }
///     }
/// }
///
/// // Usage:
/// let new_status = current_status.transition_to(VisitorStatus::Approved)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    ///
    /// This is the preferred way to change state, as it ensures
    /// the transition is valid according to the state machine rules.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal gate-lifecycle enum exercising the trait defaults.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum GatePhase {
        Closed,
        Opening,
        Open,
    }

    impl StateMachine for GatePhase {
        fn can_transition_to(&self, target: &Self) -> bool {
            use GatePhase::*;
            matches!((self, target), (Closed, Opening) | (Opening, Open))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use GatePhase::*;
            match self {
                Closed => vec![Opening],
                Opening => vec![Open],
                Open => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(
            GatePhase::Closed.transition_to(GatePhase::Opening),
            Ok(GatePhase::Opening)
        );
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        assert!(GatePhase::Closed.transition_to(GatePhase::Open).is_err());
    }

    #[test]
    fn is_terminal_matches_valid_transitions() {
        assert!(GatePhase::Open.is_terminal());
        assert!(!GatePhase::Closed.is_terminal());
        assert!(!GatePhase::Opening.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for phase in [GatePhase::Closed, GatePhase::Opening, GatePhase::Open] {
            for target in phase.valid_transitions() {
                assert!(
                    phase.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    phase,
                    target
                );
            }
        }
    }
}
