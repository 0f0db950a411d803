//! Common error infrastructure for follow-core.
//!
//! The controller itself is best-effort and never fails: missing actors are
//! skipped and pathfinding failure always has a fallback. Errors only arise
//! from wiring mistakes such as transitions to unregistered companion states.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the next tick may succeed.
    Recoverable,

    /// Invalid input that should be rejected without retry.
    Validation,

    /// Programming or wiring bug. Surfaced immediately, never retried.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all follow-core errors.
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
