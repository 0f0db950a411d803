use crate::companion::StateName;
use crate::error::{CoreError, ErrorSeverity};

/// Errors raised while driving a [`CompanionStateMachine`](crate::companion::CompanionStateMachine).
///
/// Both variants are wiring bugs rather than runtime conditions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// Transition requested to a state with no registered handler.
    #[error("unknown state: {0}")]
    UnknownState(StateName),

    /// Attempt to swap out the handler of the state that is currently active.
    #[error("cannot replace handler of active state {0}")]
    StateActive(StateName),
}

impl CoreError for StateMachineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownState(_) => ErrorSeverity::Fatal,
            Self::StateActive(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownState(_) => "COMPANION_UNKNOWN_STATE",
            Self::StateActive(_) => "COMPANION_STATE_ACTIVE",
        }
    }
}
