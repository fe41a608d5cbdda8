use std::sync::Arc;

use crate::command::{Command, Response};
use crate::error::HandlerError;
use crate::handler::Invoker;

/// Middleware wrapped around every dispatch.
///
/// Code before `chain.proceed()` runs on the way in, in registration order.
/// Code after it runs on the way out, in reverse order. Returning without
/// calling `proceed` short-circuits the remaining interceptors and the
/// handler.
pub trait Interceptor: Send + Sync {
    fn intercept(&self, chain: &mut Chain<'_>) -> Result<Response, HandlerError>;
}

impl<F> Interceptor for F
where
    F: Fn(&mut Chain<'_>) -> Result<Response, HandlerError> + Send + Sync,
{
    fn intercept(&self, chain: &mut Chain<'_>) -> Result<Response, HandlerError> {
        self(chain)
    }
}

/// One dispatch's walk through the interceptors to the terminal invoker.
///
/// Created fresh for each dispatch and dropped when it completes.
pub struct Chain<'a> {
    command: &'a Command,
    invoker: &'a dyn Invoker,
    interceptors: &'a [Arc<dyn Interceptor>],
    position: usize,
    completed: bool,
}

impl<'a> Chain<'a> {
    pub fn new(
        command: &'a Command,
        invoker: &'a dyn Invoker,
        interceptors: &'a [Arc<dyn Interceptor>],
    ) -> Self {
        Self {
            command,
            invoker,
            interceptors,
            position: 0,
            completed: false,
        }
    }

    /// Run the next interceptor, or the invoker once all interceptors have run.
    ///
    /// Errors propagate unchanged. Calling `proceed` again after the invoker
    /// has run returns [`HandlerError::ChainCompleted`].
    pub fn proceed(&mut self) -> Result<Response, HandlerError> {
        let interceptors = self.interceptors;
        match interceptors.get(self.position) {
            Some(interceptor) => {
                self.position += 1;
                interceptor.intercept(self)
            }
            None if self.completed => Err(HandlerError::ChainCompleted),
            None => {
                self.completed = true;
                self.invoker.invoke(self.command)
            }
        }
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// Number of interceptors entered so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Interceptors not yet entered.
    pub fn remaining(&self) -> usize {
        self.interceptors.len() - self.position
    }

    /// Whether the terminal invoker has been called.
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
