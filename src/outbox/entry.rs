use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::command::{Command, MessageType, Response};
use crate::error::HandlerError;
use crate::handler::Invoker;

use super::error::OutboxError;

/// Destination for deferred dispatches.
///
/// Implementations must accept concurrent `append` calls. An append either
/// stores the whole entry or fails; there is no partial state.
pub trait Outbox: Send + Sync {
    fn append(&self, entry: OutboxEntry) -> Result<(), OutboxError>;
}

/// A command waiting in an outbox, with the invoker that will eventually handle it.
#[derive(Clone)]
pub struct OutboxEntry {
    command: Command,
    invoker: Arc<dyn Invoker>,
    enqueued_at: SystemTime,
}

impl OutboxEntry {
    pub fn new(command: Command, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            command,
            invoker,
            enqueued_at: SystemTime::now(),
        }
    }

    pub fn id(&self) -> &str {
        self.command.id()
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn message_type(&self) -> MessageType {
        self.command.message_type()
    }

    pub fn enqueued_at(&self) -> SystemTime {
        self.enqueued_at
    }

    pub fn invoker(&self) -> &Arc<dyn Invoker> {
        &self.invoker
    }

    /// Run the real handler now. Called by whatever drains the outbox.
    pub fn deliver(&self) -> Result<Response, HandlerError> {
        self.invoker.invoke(&self.command)
    }
}

impl fmt::Debug for OutboxEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutboxEntry")
            .field("command", &self.command)
            .field("enqueued_at", &self.enqueued_at)
            .finish_non_exhaustive()
    }
}
