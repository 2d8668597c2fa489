//! Event capability error types.

use std::fmt;

use thiserror::Error;

/// The operation that was attempted with an undeclared event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Firing the event.
    Emit,
    /// Registering a listener (persistent or one-shot).
    Listen,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emit => f.write_str("fire"),
            Self::Listen => f.write_str("listen for"),
        }
    }
}

/// Errors raised by the event capability.
///
/// Both variants describe programmer errors in the owning type: an event
/// name that was never declared in its [`EventTypes`](crate::EventTypes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The event name is not part of the declared event type set.
    #[error("attempting to {operation} unknown event '{event}'")]
    UnknownEvent {
        /// The offending event name.
        event: String,
        /// What was being attempted.
        operation: Operation,
    },
}

impl EventError {
    pub(crate) fn unknown(event: &str, operation: Operation) -> Self {
        Self::UnknownEvent {
            event: event.to_string(),
            operation,
        }
    }

    /// The event name that caused the error.
    #[must_use]
    pub fn event(&self) -> &str {
        match self {
            Self::UnknownEvent { event, .. } => event,
        }
    }

    /// The operation that was rejected.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::UnknownEvent { operation, .. } => *operation,
        }
    }
}

/// Result type for event capability operations.
pub type EventResult<T> = Result<T, EventError>;
