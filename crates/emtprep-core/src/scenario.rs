//! Branching-scenario session engine.
//!
//! Deterministic traversal of a directed, possibly cyclic step graph
//! driven by user choices. A session accumulates a signed score and
//! terminates on a dead end, an unresolved next-step reference, or an
//! auto-fail option. One engine holds at most one session at a time.

use std::sync::Arc;

use crate::error::EngineError;
use crate::model::{Scenario, Step, StepOption};

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No session; waiting for `start`.
    NotStarted,
    /// A session is walking the step graph.
    InProgress,
    /// The session reached a dead end or an unresolved reference.
    Completed,
    /// The session confirmed an auto-fail option.
    Failed,
}

/// Final result of a terminated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Total accumulated points. Signed and unclamped.
    pub score: i32,
    /// `true` if the session ended on an auto-fail option.
    pub failed: bool,
}

#[derive(Debug)]
struct Session {
    scenario: Arc<Scenario>,
    current_step_id: String,
    selected_option_id: Option<String>,
    score: i32,
    terminal: Option<bool>, // Some(failed) once terminated
}

impl Session {
    fn current_step(&self) -> &Step {
        // current_step_id is only ever set from a successful lookup
        self.scenario
            .step(&self.current_step_id)
            .expect("current step resolved at transition time")
    }
}

/// The scenario engine: owns the single active session, if any.
#[derive(Debug, Default)]
pub struct ScenarioEngine {
    session: Option<Session>,
}

impl ScenarioEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session on `scenario` at its entry step.
    ///
    /// Fails with [`EngineError::MissingEntryStep`] if the scenario has no
    /// `step1`, and with [`EngineError::SessionActive`] if a session
    /// already exists (reset first).
    pub fn start(&mut self, scenario: Arc<Scenario>) -> Result<(), EngineError> {
        if self.session.is_some() {
            return Err(EngineError::SessionActive);
        }
        let entry = scenario
            .entry_step()
            .ok_or_else(|| EngineError::MissingEntryStep(scenario.id.clone()))?;
        let current_step_id = entry.step_id.clone();
        self.session = Some(Session {
            scenario,
            current_step_id,
            selected_option_id: None,
            score: 0,
            terminal: None,
        });
        Ok(())
    }

    /// Record a tentative choice on the current step.
    ///
    /// Returns `true` if the selection was applied. Unknown option IDs,
    /// a missing session, or a terminated session leave the engine
    /// untouched and return `false`.
    pub fn select(&mut self, option_id: &str) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.terminal.is_some() {
            return false;
        }
        let known = session
            .current_step()
            .options
            .iter()
            .any(|o| o.option_id == option_id);
        if !known {
            tracing::debug!(option_id, "ignoring selection of unknown option");
            return false;
        }
        session.selected_option_id = Some(option_id.to_string());
        true
    }

    /// Confirm the selected option and transition.
    ///
    /// Adds the option's points exactly once, then either fails the
    /// session (auto-fail), advances to the resolved next step, or
    /// completes it when the next step is absent or unresolved.
    pub fn confirm(&mut self) -> Result<EngineState, EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoActiveSession)?;
        if session.terminal.is_some() {
            return Err(EngineError::SessionFinished);
        }
        let selected = session
            .selected_option_id
            .take()
            .ok_or(EngineError::NoSelection)?;

        // First match wins if the data carries duplicate option IDs.
        let option: &StepOption = session
            .current_step()
            .options
            .iter()
            .find(|o| o.option_id == selected)
            .expect("selection validated against current step");
        let points = option.points;
        let is_auto_fail = option.is_auto_fail;
        let next_step_id = option.next_step_id.clone();

        session.score += points;

        if is_auto_fail {
            session.terminal = Some(true);
            return Ok(EngineState::Failed);
        }

        match next_step_id.and_then(|id| session.scenario.step(&id).map(|s| s.step_id.clone())) {
            Some(next) => {
                session.current_step_id = next;
                Ok(EngineState::InProgress)
            }
            None => {
                // Dead end or unresolved reference: normal completion.
                session.terminal = Some(false);
                Ok(EngineState::Completed)
            }
        }
    }

    /// Discard the session entirely, returning to `NotStarted`.
    pub fn reset(&mut self) {
        self.session = None;
    }

    pub fn state(&self) -> EngineState {
        match &self.session {
            None => EngineState::NotStarted,
            Some(s) => match s.terminal {
                None => EngineState::InProgress,
                Some(false) => EngineState::Completed,
                Some(true) => EngineState::Failed,
            },
        }
    }

    /// The step the session is currently at, while in progress.
    pub fn current_step(&self) -> Option<&Step> {
        self.session
            .as_ref()
            .filter(|s| s.terminal.is_none())
            .map(|s| s.current_step())
    }

    /// The tentative selection, if any.
    pub fn selected(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.selected_option_id.as_deref())
    }

    /// Accumulated score of the active session.
    pub fn score(&self) -> Option<i32> {
        self.session.as_ref().map(|s| s.score)
    }

    /// Final outcome once the session has terminated.
    pub fn outcome(&self) -> Option<Outcome> {
        self.session.as_ref().and_then(|s| {
            s.terminal.map(|failed| Outcome {
                score: s.score,
                failed,
            })
        })
    }
}
