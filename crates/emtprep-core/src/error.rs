//! Engine error types.
//!
//! These cover scenario loading and session-state violations. Invalid
//! option selection is deliberately NOT an error: the engine treats it as
//! a silent no-op, matching the caller-precondition contract.

use thiserror::Error;

/// Errors produced by the scenario and quiz engines.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The serialized step graph of a scenario record could not be parsed.
    #[error("malformed scenario '{id}': {reason}")]
    MalformedScenario { id: String, reason: String },

    /// The scenario has no entry step and cannot be started.
    #[error("scenario '{0}' has no entry step 'step1'")]
    MissingEntryStep(String),

    /// A session is already active; reset before starting another.
    #[error("a session is already active")]
    SessionActive,

    /// An operation that requires an active session was called without one.
    #[error("no active session")]
    NoActiveSession,

    /// The session has already completed or failed.
    #[error("session already finished")]
    SessionFinished,

    /// `confirm` was called before any option was selected.
    #[error("no option selected")]
    NoSelection,

    /// A quiz was started with an empty question list.
    #[error("quiz '{0}' has no questions")]
    EmptyQuiz(String),
}

impl EngineError {
    /// Returns `true` for load-time errors where the offending record
    /// should be skipped and loading should continue.
    pub fn is_skippable(&self) -> bool {
        matches!(self, EngineError::MalformedScenario { .. })
    }
}
