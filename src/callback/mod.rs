//! Callbacks - how a dispatch reports its outcome.
//!
//! Every publish ends in exactly one [`Outcome`], and exactly one callback
//! method fires for it:
//!
//! | Outcome            | Callback method           |
//! |--------------------|---------------------------|
//! | `Succeeded`        | `on_success(response)`    |
//! | `ValidationFailed` | `on_validation_failure(command)` |
//! | `Failed`           | `on_failure(error)`       |

use crate::command::{Command, Response};
use crate::error::DispatchError;

/// Final result of one dispatch.
#[derive(Debug)]
pub enum Outcome {
    Succeeded(Response),
    /// The handler or an interceptor rejected the message. Carries the
    /// command exactly as it was published.
    ValidationFailed(Command),
    Failed(DispatchError),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            Outcome::Succeeded(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Collapse into a `Result`, turning a validation failure into
    /// [`DispatchError::ValidationFailed`].
    pub fn into_result(self) -> Result<Response, DispatchError> {
        match self {
            Outcome::Succeeded(response) => Ok(response),
            Outcome::ValidationFailed(command) => Err(DispatchError::ValidationFailed { command }),
            Outcome::Failed(err) => Err(err),
        }
    }
}

/// Receives the outcome of a dispatch.
pub trait Callback {
    fn on_success(&mut self, response: Response);

    fn on_failure(&mut self, error: DispatchError);

    fn on_validation_failure(&mut self, command: Command);

    /// Route an outcome to the matching method.
    fn complete(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Succeeded(response) => self.on_success(response),
            Outcome::ValidationFailed(command) => self.on_validation_failure(command),
            Outcome::Failed(err) => self.on_failure(err),
        }
    }
}

/// Ignores success and keeps the failure so it can be raised to the caller.
///
/// Backs [`Dispatcher::publish_checked`](crate::Dispatcher::publish_checked).
#[derive(Debug, Default)]
pub struct FailFastCallback {
    error: Option<DispatchError>,
}

impl FailFastCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_result(self) -> Result<(), DispatchError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Callback for FailFastCallback {
    fn on_success(&mut self, _response: Response) {}

    fn on_failure(&mut self, error: DispatchError) {
        self.error = Some(error);
    }

    fn on_validation_failure(&mut self, command: Command) {
        self.error = Some(DispatchError::ValidationFailed { command });
    }
}

/// Keeps the outcome for later inspection.
#[derive(Debug, Default)]
pub struct OutcomeCallback {
    outcome: Option<Outcome>,
}

impl OutcomeCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        self.outcome
    }
}

impl Callback for OutcomeCallback {
    fn on_success(&mut self, response: Response) {
        self.outcome = Some(Outcome::Succeeded(response));
    }

    fn on_failure(&mut self, error: DispatchError) {
        self.outcome = Some(Outcome::Failed(error));
    }

    fn on_validation_failure(&mut self, command: Command) {
        self.outcome = Some(Outcome::ValidationFailed(command));
    }
}
