use thiserror::Error;

use crate::types::RobotKind;

/// Errors raised by the environment when it refuses an action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Illegal {action}: {reason}")]
    Illegal {
        action: &'static str,
        reason: String,
    },

    #[error("Cannot {0}: action cooldown not ready")]
    NotReady(&'static str),

    #[error("Robot has been destroyed")]
    Destroyed,
}

impl ActionError {
    /// Shorthand for an [`ActionError::Illegal`] rejection.
    pub fn illegal(action: &'static str, reason: impl Into<String>) -> Self {
        ActionError::Illegal {
            action,
            reason: reason.into(),
        }
    }
}

/// Failure of a single turn, caught by the dispatch loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// The environment rejected an action the policy issued.
    #[error("{kind} action rejected: {source}")]
    Rejected {
        kind: RobotKind,
        #[source]
        source: ActionError,
    },

    /// Any other fault inside the policy, e.g. a panic.
    #[error("{kind} fault: {message}")]
    Fault { kind: RobotKind, message: String },
}

impl TurnError {
    /// Role of the robot whose turn failed.
    pub fn kind(&self) -> RobotKind {
        match self {
            TurnError::Rejected { kind, .. } | TurnError::Fault { kind, .. } => *kind,
        }
    }
}
