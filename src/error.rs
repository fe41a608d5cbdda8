use std::error::Error;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::outbox::OutboxError;

/// Boxed error returned by handlers that fail for reasons of their own.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// A single rejected field of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

/// Raised by a handler or interceptor that rejects the content of a message.
///
/// The dispatcher routes this to `Callback::on_validation_failure` instead of
/// `on_failure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for an error with a single violation.
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new().with(field, reason)
    }

    /// Add a violation. Builder pattern.
    pub fn with(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.push(field, reason);
        self
    }

    pub fn push(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.violations.push(Violation {
            field: field.into(),
            reason: reason.into(),
        });
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` when nothing was collected, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return "validation failed".to_string();
    }
    let reasons: Vec<String> = violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.reason))
        .collect();
    format!("validation failed: {}", reasons.join("; "))
}

/// Error raised inside a dispatch: by an invoker, an interceptor or the chain itself.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The message was rejected as invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Appending to the outbox failed.
    #[error(transparent)]
    Outbox(#[from] OutboxError),
    /// The command body is not the message type the invoker is bound to.
    #[error("expected a {expected} message, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// `Chain::proceed` was called after the terminal invoker already ran.
    #[error("interceptor chain already completed")]
    ChainCompleted,
    /// Any other handler failure.
    #[error("handler failed: {0}")]
    Failed(#[source] BoxError),
}

impl HandlerError {
    pub fn failed<E: Into<BoxError>>(err: E) -> Self {
        HandlerError::Failed(err.into())
    }

    pub fn msg(message: impl Into<String>) -> Self {
        HandlerError::Failed(message.into().into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, HandlerError::Validation(_))
    }
}

/// Error surfaced to callers of the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A required argument was absent; nothing was dispatched.
    #[error("precondition failed: {0}")]
    Precondition(&'static str),
    /// No invoker is registered for the exact message type.
    #[error("could not find a command handler for {message_type}")]
    HandlerNotFound { message_type: &'static str },
    /// Re-raised validation failure, carrying the command that was rejected.
    #[error("{} command {} failed validation", .command.message_type(), .command.id())]
    ValidationFailed { command: Command },
    /// The chain failed with anything other than a validation error.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::HandlerNotFound { .. })
    }
}
