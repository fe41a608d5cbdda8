//! In-memory outbox for testing and single-process scenarios.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::entry::{Outbox, OutboxEntry};
use super::error::OutboxError;
use crate::command::MessageType;

/// In-memory outbox backed by a shared `Vec`.
///
/// Clones share the same storage, so one clone can be handed to the
/// dispatcher while another is kept for draining.
///
/// ```
/// use std::sync::Arc;
/// use sourced_dispatch::{Dispatcher, HandlerError, InMemoryOutbox};
///
/// struct SendEmail { to: String }
///
/// let outbox = InMemoryOutbox::new();
/// let dispatcher = Dispatcher::builder()
///     .outbox(Arc::new(outbox.clone()))
///     .build();
/// dispatcher.subscribe_fn(|_: &SendEmail| Ok::<_, HandlerError>(()));
///
/// dispatcher.publish_checked(SendEmail { to: "a@example.com".into() }).unwrap();
/// assert_eq!(outbox.len(), 1);
///
/// for entry in outbox.drain().unwrap() {
///     entry.deliver().unwrap();
/// }
/// assert!(outbox.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryOutbox {
    entries: Arc<Mutex<Vec<OutboxEntry>>>,
}

impl InMemoryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the pending entries, oldest first.
    pub fn entries(&self) -> Vec<OutboxEntry> {
        self.pending().clone()
    }

    /// Remove and return every pending entry, oldest first.
    pub fn drain(&self) -> Result<Vec<OutboxEntry>, OutboxError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| OutboxError::LockPoisoned("drain"))?;
        Ok(std::mem::take(&mut *entries))
    }

    pub fn message_types(&self) -> Vec<MessageType> {
        self.entries()
            .iter()
            .map(|entry| entry.message_type())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Reads see every appended entry even after a panic while the lock was
    // held. `append` and `drain` still report the poisoning.
    fn pending(&self) -> MutexGuard<'_, Vec<OutboxEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Outbox for InMemoryOutbox {
    fn append(&self, entry: OutboxEntry) -> Result<(), OutboxError> {
        self.entries
            .lock()
            .map_err(|_| OutboxError::LockPoisoned("append"))?
            .push(entry);
        Ok(())
    }
}
