use std::sync::Arc;

use tracing::debug;

use super::entry::{Outbox, OutboxEntry};
use crate::command::{Command, Response};
use crate::error::HandlerError;
use crate::handler::Invoker;

/// Invoker decorator that appends to an outbox instead of calling through.
///
/// The wrapped invoker is never called from `invoke`; it travels with the
/// [`OutboxEntry`] so an outbox consumer can run it later. A failed append
/// is returned as [`HandlerError::Outbox`].
pub struct OutboxInvoker {
    inner: Arc<dyn Invoker>,
    outbox: Arc<dyn Outbox>,
}

impl OutboxInvoker {
    pub fn new(inner: Arc<dyn Invoker>, outbox: Arc<dyn Outbox>) -> Self {
        Self { inner, outbox }
    }

    /// Wrap `invoker` so its dispatches are deferred through `outbox`.
    pub fn decorate(invoker: Arc<dyn Invoker>, outbox: Arc<dyn Outbox>) -> Arc<dyn Invoker> {
        Arc::new(Self::new(invoker, outbox))
    }

    pub fn inner(&self) -> &Arc<dyn Invoker> {
        &self.inner
    }
}

impl Invoker for OutboxInvoker {
    fn invoke(&self, command: &Command) -> Result<Response, HandlerError> {
        self.outbox
            .append(OutboxEntry::new(command.clone(), Arc::clone(&self.inner)))?;
        debug!(
            command_id = command.id(),
            message_type = command.message_type().name(),
            "Appended {} to outbox",
            command.message_type()
        );
        Ok(Response::empty())
    }
}
