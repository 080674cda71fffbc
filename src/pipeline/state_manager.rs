//! Pipeline state machine - single source of truth for valid transitions
//!
//! State diagram:
//! ```text
//! Idle ──Select──> FileSelected ──Submit──> Submitting ──Succeed──> Done
//!                      │  ↑                     │                    │
//!                   [Reset]│                  [Fail]              [Reset]
//!                      │   │                     ↓                    │
//!                      │   └──Select/Submit── Failed                  │
//!                      └──────────────────────────────────> Idle <───┘
//! ```
//!
//! Failed is an interactive state: the selection is retained and both a new
//! Select and a retry Submit are valid from it. Submitting accepts nothing
//! but its own completion events, which is what makes submission single-flight.

use std::sync::Mutex;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PipelineEvent {
    /// A validated file was picked
    Select,
    /// User triggered analysis of the current selection
    Submit,
    /// The predict request returned a result
    Succeed,
    /// The predict request failed
    Fail,
    /// Explicit reset back to the empty state
    Reset,
}

/// Actions the Controller should perform after a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineAction {
    /// Store the new selection and publish its preview
    ReplaceSelection,
    /// Kick off the predict request
    StartPredict,
    /// Render and publish the fresh result
    PublishResult,
    /// Surface the failure, keeping the selection for retry
    ReportFailure,
    /// Drop selection and result
    ClearSession,
}

/// Pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PipelineState {
    /// Nothing selected
    Idle,
    /// A valid file is selected, submit is armed
    FileSelected,
    /// A predict request is in flight
    Submitting,
    /// A result is being displayed
    Done,
    /// The last request failed; selection retained, retry allowed
    Failed,
}

impl PipelineState {
    /// Check whether a request is currently in flight
    pub fn is_submitting(self) -> bool {
        self == Self::Submitting
    }
}

/// Result of a successful state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionResult {
    /// State changed
    Changed {
        from: PipelineState,
        to: PipelineState,
        action: Option<PipelineAction>,
    },
    /// Event was valid but the state did not change (e.g. re-selecting a
    /// file while one is already selected still replaces it)
    Unchanged { action: Option<PipelineAction> },
}

/// Reason a transition was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{attempted_event} event rejected in {current_state} state")]
pub struct TransitionRejection {
    pub current_state: PipelineState,
    pub attempted_event: PipelineEvent,
}

/// Thread-safe pipeline state manager
#[derive(Debug)]
pub struct PipelineStateManager {
    state: Mutex<PipelineState>,
}

impl PipelineStateManager {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PipelineState::Idle),
        }
    }

    /// Get the current state (read-only, thread-safe)
    pub fn current(&self) -> PipelineState {
        *self.state.lock().unwrap()
    }

    /// Check whether a predict request is in flight
    pub fn is_submitting(&self) -> bool {
        self.current().is_submitting()
    }

    /// Attempt a state transition based on an event
    ///
    /// This is the ONLY way to change state - ensures all transitions are valid.
    pub fn transition(
        &self,
        event: PipelineEvent,
    ) -> Result<TransitionResult, TransitionRejection> {
        let mut state = self.state.lock().unwrap();
        let current = *state;

        match Self::compute_transition(current, event) {
            Some((new_state, action)) => {
                if new_state == current {
                    return Ok(TransitionResult::Unchanged { action });
                }

                *state = new_state;
                Ok(TransitionResult::Changed {
                    from: current,
                    to: new_state,
                    action,
                })
            }
            None => Err(TransitionRejection {
                current_state: current,
                attempted_event: event,
            }),
        }
    }

    /// Pure function: compute what transition should happen (if any)
    /// Returns None if the transition is invalid
    fn compute_transition(
        current: PipelineState,
        event: PipelineEvent,
    ) -> Option<(PipelineState, Option<PipelineAction>)> {
        match current {
            PipelineState::Idle => match event {
                PipelineEvent::Select => Some((
                    PipelineState::FileSelected,
                    Some(PipelineAction::ReplaceSelection),
                )),
                _ => None,
            },

            PipelineState::FileSelected => match event {
                PipelineEvent::Select => Some((
                    PipelineState::FileSelected,
                    Some(PipelineAction::ReplaceSelection),
                )),
                PipelineEvent::Submit => Some((
                    PipelineState::Submitting,
                    Some(PipelineAction::StartPredict),
                )),
                PipelineEvent::Reset => {
                    Some((PipelineState::Idle, Some(PipelineAction::ClearSession)))
                }
                _ => None,
            },

            // Only completion events leave Submitting: submit is single-flight
            // and reset is refused while a request is in flight.
            PipelineState::Submitting => match event {
                PipelineEvent::Succeed => {
                    Some((PipelineState::Done, Some(PipelineAction::PublishResult)))
                }
                PipelineEvent::Fail => {
                    Some((PipelineState::Failed, Some(PipelineAction::ReportFailure)))
                }
                _ => None,
            },

            PipelineState::Done => match event {
                PipelineEvent::Select => Some((
                    PipelineState::FileSelected,
                    Some(PipelineAction::ReplaceSelection),
                )),
                // Re-analyzing the same selection is allowed
                PipelineEvent::Submit => Some((
                    PipelineState::Submitting,
                    Some(PipelineAction::StartPredict),
                )),
                PipelineEvent::Reset => {
                    Some((PipelineState::Idle, Some(PipelineAction::ClearSession)))
                }
                _ => None,
            },

            PipelineState::Failed => match event {
                PipelineEvent::Select => Some((
                    PipelineState::FileSelected,
                    Some(PipelineAction::ReplaceSelection),
                )),
                PipelineEvent::Submit => Some((
                    PipelineState::Submitting,
                    Some(PipelineAction::StartPredict),
                )),
                PipelineEvent::Reset => {
                    Some((PipelineState::Idle, Some(PipelineAction::ClearSession)))
                }
                _ => None,
            },
        }
    }

    /// Reset to Idle state, used for error recovery
    pub fn reset(&self) {
        *self.state.lock().unwrap() = PipelineState::Idle;
    }
}

impl Default for PipelineStateManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(state: PipelineState) -> PipelineStateManager {
        let manager = PipelineStateManager::new();
        *manager.state.lock().unwrap() = state;
        manager
    }

    #[test]
    fn test_happy_path_transitions() {
        let manager = PipelineStateManager::new();

        let steps = [
            (PipelineEvent::Select, PipelineState::FileSelected),
            (PipelineEvent::Submit, PipelineState::Submitting),
            (PipelineEvent::Succeed, PipelineState::Done),
            (PipelineEvent::Reset, PipelineState::Idle),
        ];

        for (event, expected) in steps {
            manager.transition(event).unwrap();
            assert_eq!(manager.current(), expected);
        }
    }

    #[test]
    fn test_submit_while_submitting_is_rejected() {
        let manager = manager_in(PipelineState::Submitting);

        let rejection = manager.transition(PipelineEvent::Submit).unwrap_err();
        assert_eq!(rejection.current_state, PipelineState::Submitting);
        assert_eq!(rejection.attempted_event, PipelineEvent::Submit);
        assert_eq!(manager.current(), PipelineState::Submitting);
    }

    #[test]
    fn test_reset_while_submitting_is_rejected() {
        let manager = manager_in(PipelineState::Submitting);

        assert!(manager.transition(PipelineEvent::Reset).is_err());
        assert_eq!(manager.current(), PipelineState::Submitting);
    }

    #[test]
    fn test_reselect_replaces_without_state_change() {
        let manager = manager_in(PipelineState::FileSelected);

        let result = manager.transition(PipelineEvent::Select).unwrap();
        assert_eq!(
            result,
            TransitionResult::Unchanged {
                action: Some(PipelineAction::ReplaceSelection)
            }
        );
        assert_eq!(manager.current(), PipelineState::FileSelected);
    }

    #[test]
    fn test_failure_keeps_pipeline_interactive() {
        let manager = manager_in(PipelineState::Submitting);
        manager.transition(PipelineEvent::Fail).unwrap();
        assert_eq!(manager.current(), PipelineState::Failed);

        // Retry with the retained selection
        let result = manager.transition(PipelineEvent::Submit).unwrap();
        assert_eq!(
            result,
            TransitionResult::Changed {
                from: PipelineState::Failed,
                to: PipelineState::Submitting,
                action: Some(PipelineAction::StartPredict),
            }
        );
    }

    #[test]
    fn test_done_allows_reanalysis_and_new_selection() {
        let manager = manager_in(PipelineState::Done);
        assert!(manager.transition(PipelineEvent::Submit).is_ok());

        let manager = manager_in(PipelineState::Done);
        assert!(manager.transition(PipelineEvent::Select).is_ok());
        assert_eq!(manager.current(), PipelineState::FileSelected);
    }

    #[test]
    fn test_idle_rejects_everything_but_select() {
        let manager = PipelineStateManager::new();

        for event in [
            PipelineEvent::Submit,
            PipelineEvent::Succeed,
            PipelineEvent::Fail,
            PipelineEvent::Reset,
        ] {
            assert!(manager.transition(event).is_err());
            assert_eq!(manager.current(), PipelineState::Idle);
        }
    }

    #[test]
    fn test_completion_events_only_valid_while_submitting() {
        for state in [
            PipelineState::Idle,
            PipelineState::FileSelected,
            PipelineState::Done,
            PipelineState::Failed,
        ] {
            let manager = manager_in(state);
            assert!(manager.transition(PipelineEvent::Succeed).is_err());
            assert!(manager.transition(PipelineEvent::Fail).is_err());
        }
    }
}
