//! Synchronous dispatcher.
//!
//! `publish` runs on the caller's thread: look up the invoker, walk the
//! interceptor chain, and hand the outcome to the callback before returning.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::builder::DispatcherBuilder;
use crate::callback::{Callback, FailFastCallback, Outcome};
use crate::command::{Command, MessageType};
use crate::error::{DispatchError, HandlerError};
use crate::handler::{Binding, HandlerSource, Invoker};
use crate::interceptor::{Chain, Interceptor};
use crate::outbox::{Outbox, OutboxInvoker};
use crate::registry::HandlerRegistry;

/// Routes each message to the one handler registered for its type.
///
/// Cloning is cheap; clones share the registry and interceptors and may be
/// used from different threads.
#[derive(Clone)]
pub struct Dispatcher {
    registry: HandlerRegistry,
    interceptors: Arc<[Arc<dyn Interceptor>]>,
    outbox: Option<Arc<dyn Outbox>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher with its own registry and no interceptors.
    pub fn new() -> Self {
        DispatcherBuilder::new().build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub(super) fn from_parts(
        registry: HandlerRegistry,
        interceptors: Arc<[Arc<dyn Interceptor>]>,
        outbox: Option<Arc<dyn Outbox>>,
    ) -> Self {
        Self {
            registry,
            interceptors,
            outbox,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    pub fn has_outbox(&self) -> bool {
        self.outbox.is_some()
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Register every handler the source reports. Returns how many were registered.
    pub fn subscribe<S: HandlerSource>(&self, handler: S) -> usize {
        self.subscribe_shared(Arc::new(handler))
    }

    /// Like [`subscribe`](Self::subscribe) for a handler the caller keeps a handle to.
    pub fn subscribe_shared<S: HandlerSource>(&self, handler: Arc<S>) -> usize {
        let bindings = handler.bindings();
        let count = bindings.len();
        for binding in bindings {
            self.subscribe_binding(binding);
        }
        count
    }

    /// Register a closure as the handler for `M`.
    pub fn subscribe_fn<M, T, F>(&self, handler: F) -> Option<Arc<dyn Invoker>>
    where
        M: Any + Send + Sync,
        T: Any + Send + Sync,
        F: Fn(&M) -> Result<T, HandlerError> + Send + Sync + 'static,
    {
        self.subscribe_binding(Binding::from_fn(handler))
    }

    pub fn subscribe_binding(&self, binding: Binding) -> Option<Arc<dyn Invoker>> {
        let (message_type, invoker) = binding.into_parts();
        self.subscribe_invoker(message_type, invoker)
    }

    /// Register `invoker` for `message_type`, decorating it with the outbox if
    /// one is configured. Returns the invoker it replaced.
    pub fn subscribe_invoker(
        &self,
        message_type: MessageType,
        invoker: Arc<dyn Invoker>,
    ) -> Option<Arc<dyn Invoker>> {
        let invoker = match &self.outbox {
            Some(outbox) => OutboxInvoker::decorate(invoker, Arc::clone(outbox)),
            None => invoker,
        };
        debug!(message_type = message_type.name(), "Subscribing handler");
        self.registry.subscribe(message_type, invoker)
    }

    // ------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------

    /// Dispatch `message` and report the outcome to `callback`.
    pub fn publish<M, C>(&self, message: M, callback: &mut C)
    where
        M: Any + Send + Sync,
        C: Callback + ?Sized,
    {
        self.publish_command(Command::new(message), callback);
    }

    /// Dispatch an already wrapped command, keeping its metadata.
    pub fn publish_command<C>(&self, command: Command, callback: &mut C)
    where
        C: Callback + ?Sized,
    {
        callback.complete(self.run(&command));
    }

    /// Dispatch `message`, ignoring success and returning any failure.
    ///
    /// A validation failure comes back as [`DispatchError::ValidationFailed`].
    pub fn publish_checked<M: Any + Send + Sync>(&self, message: M) -> Result<(), DispatchError> {
        let mut callback = FailFastCallback::new();
        self.publish(message, &mut callback);
        callback.into_result()
    }

    /// Dispatch `message` and return the outcome directly.
    pub fn dispatch<M: Any + Send + Sync>(&self, message: M) -> Outcome {
        self.run(&Command::new(message))
    }

    /// Entry point for callers holding type-erased, possibly absent arguments.
    ///
    /// Fails with [`DispatchError::Precondition`] before dispatching if either
    /// the command or the callback is missing.
    pub fn publish_erased(
        &self,
        command: Option<Command>,
        callback: Option<&mut dyn Callback>,
    ) -> Result<(), DispatchError> {
        let command = command.ok_or(DispatchError::Precondition("The message cannot be null."))?;
        let callback =
            callback.ok_or(DispatchError::Precondition("The callback cannot be null."))?;
        self.publish_command(command, callback);
        Ok(())
    }

    fn run(&self, command: &Command) -> Outcome {
        debug!(
            command_id = command.id(),
            "Received a message to publish: {}",
            command.message_type()
        );
        let outcome = self.execute(command);
        debug!(
            command_id = command.id(),
            "Finished executing command {}",
            command.message_type()
        );
        outcome
    }

    fn execute(&self, command: &Command) -> Outcome {
        let invoker = match self.registry.lookup(&command.message_type()) {
            Ok(invoker) => invoker,
            Err(err) => return Outcome::Failed(err),
        };

        let mut chain = Chain::new(command, invoker.as_ref(), &self.interceptors);
        match chain.proceed() {
            Ok(response) => Outcome::Succeeded(response),
            Err(HandlerError::Validation(_)) => Outcome::ValidationFailed(command.clone()),
            Err(err) => Outcome::Failed(DispatchError::Handler(err)),
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .field("interceptors", &self.interceptors.len())
            .field("outbox", &self.outbox.is_some())
            .finish()
    }
}
