//! Runner state machine.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::SvnRunnerError;

/// Lifecycle state of a [`ProcessRunner`](super::ProcessRunner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerState {
    /// No command is executing.
    #[default]
    Idle,
    /// A command is executing.
    Running,
    /// Cancellation was requested for the executing command.
    Cancelling,
}

impl RunnerState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Idle -> Running
    /// - Running -> Cancelling
    /// - Running -> Idle
    /// - Cancelling -> Idle
    pub fn can_transition_to(&self, target: RunnerState) -> bool {
        use RunnerState::*;
        matches!(
            (*self, target),
            (Idle, Running) | (Running, Cancelling) | (Running, Idle) | (Cancelling, Idle)
        )
    }

    /// Check if a command is live in this state.
    pub fn is_busy(&self) -> bool {
        !matches!(self, RunnerState::Idle)
    }

    fn to_u8(self) -> u8 {
        match self {
            RunnerState::Idle => 0,
            RunnerState::Running => 1,
            RunnerState::Cancelling => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => RunnerState::Running,
            2 => RunnerState::Cancelling,
            _ => RunnerState::Idle,
        }
    }
}

/// Atomically updated [`RunnerState`], shared between `exec` and `interrupt`.
#[derive(Debug, Default)]
pub struct AtomicRunnerState(AtomicU8);

impl AtomicRunnerState {
    /// Create a cell in the `Idle` state.
    pub fn new() -> Self {
        Self(AtomicU8::new(RunnerState::Idle.to_u8()))
    }

    /// Current state.
    pub fn load(&self) -> RunnerState {
        RunnerState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Move from `from` to `to` if the cell still holds `from`.
    ///
    /// Fails with `InvalidStateTransition` when the transition is not allowed
    /// or the current state is not `from`.
    pub fn transition(&self, from: RunnerState, to: RunnerState) -> crate::Result<()> {
        if !from.can_transition_to(to) {
            return Err(SvnRunnerError::InvalidStateTransition { from, to });
        }
        self.0
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|actual| SvnRunnerError::InvalidStateTransition {
                from: RunnerState::from_u8(actual),
                to,
            })
    }

    /// Return to `Idle` from whichever busy state the cell is in.
    pub fn reset(&self) -> RunnerState {
        RunnerState::from_u8(self.0.swap(RunnerState::Idle.to_u8(), Ordering::AcqRel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        let state = AtomicRunnerState::new();
        assert!(state.transition(RunnerState::Idle, RunnerState::Running).is_ok());
        assert_eq!(state.load(), RunnerState::Running);

        assert!(state
            .transition(RunnerState::Running, RunnerState::Cancelling)
            .is_ok());
        assert_eq!(state.load(), RunnerState::Cancelling);

        assert!(state.transition(RunnerState::Cancelling, RunnerState::Idle).is_ok());
        assert_eq!(state.load(), RunnerState::Idle);
    }

    #[test]
    fn test_invalid_idle_to_cancelling() {
        let state = AtomicRunnerState::new();
        assert!(state
            .transition(RunnerState::Idle, RunnerState::Cancelling)
            .is_err());
        // State should remain unchanged
        assert_eq!(state.load(), RunnerState::Idle);
    }

    #[test]
    fn test_stale_from_state_rejected() {
        let state = AtomicRunnerState::new();
        // Cell is Idle, so a Running -> Cancelling request must fail.
        let err = state
            .transition(RunnerState::Running, RunnerState::Cancelling)
            .unwrap_err();
        assert!(matches!(
            err,
            SvnRunnerError::InvalidStateTransition {
                from: RunnerState::Idle,
                to: RunnerState::Cancelling
            }
        ));
    }

    #[test]
    fn test_second_start_rejected() {
        let state = AtomicRunnerState::new();
        state.transition(RunnerState::Idle, RunnerState::Running).unwrap();
        assert!(state.transition(RunnerState::Idle, RunnerState::Running).is_err());
    }

    #[test]
    fn test_reset() {
        let state = AtomicRunnerState::new();
        state.transition(RunnerState::Idle, RunnerState::Running).unwrap();
        state
            .transition(RunnerState::Running, RunnerState::Cancelling)
            .unwrap();
        assert_eq!(state.reset(), RunnerState::Cancelling);
        assert_eq!(state.load(), RunnerState::Idle);
    }

    #[test]
    fn test_is_busy() {
        assert!(!RunnerState::Idle.is_busy());
        assert!(RunnerState::Running.is_busy());
        assert!(RunnerState::Cancelling.is_busy());
    }

    #[test]
    fn test_default() {
        assert_eq!(RunnerState::default(), RunnerState::Idle);
    }
}
