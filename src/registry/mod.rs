//! Handler registry - one invoker per message type.
//!
//! Backed by a `DashMap`, so lookups and subscriptions from many threads
//! never need an external lock. Re-subscribing a type replaces the previous
//! invoker and logs a warning; it is not an error.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;

use crate::command::MessageType;
use crate::error::DispatchError;
use crate::handler::{Binding, Invoker};

/// Shared mapping from message type to invoker.
///
/// Cloning is cheap and every clone sees the same subscriptions.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Arc<DashMap<MessageType, Arc<dyn Invoker>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `invoker` for `message_type`, returning the invoker it replaced.
    pub fn subscribe(
        &self,
        message_type: MessageType,
        invoker: Arc<dyn Invoker>,
    ) -> Option<Arc<dyn Invoker>> {
        let previous = self.handlers.insert(message_type, invoker);
        if previous.is_some() {
            warn!(
                message_type = message_type.name(),
                "Subscription for {} already exists. Silently overwriting previous subscription.",
                message_type
            );
        }
        previous
    }

    pub fn subscribe_binding(&self, binding: Binding) -> Option<Arc<dyn Invoker>> {
        let (message_type, invoker) = binding.into_parts();
        self.subscribe(message_type, invoker)
    }

    /// Find the invoker for the exact message type.
    ///
    /// The returned `Arc` is detached from the map, so no shard lock is held
    /// while the handler runs.
    pub fn lookup(&self, message_type: &MessageType) -> Result<Arc<dyn Invoker>, DispatchError> {
        self.handlers
            .get(message_type)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(DispatchError::HandlerNotFound {
                message_type: message_type.name(),
            })
    }

    pub fn contains(&self, message_type: &MessageType) -> bool {
        self.handlers.contains_key(message_type)
    }

    pub fn unsubscribe(&self, message_type: &MessageType) -> Option<Arc<dyn Invoker>> {
        self.handlers.remove(message_type).map(|(_, invoker)| invoker)
    }

    pub fn message_types(&self) -> Vec<MessageType> {
        self.handlers.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("message_types", &self.message_types())
            .finish()
    }
}
