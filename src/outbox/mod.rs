//! Outbox - deferring handler execution.
//!
//! Decorating an invoker with [`OutboxInvoker`] turns a dispatch into an
//! append: the command and the real invoker are stored as an
//! [`OutboxEntry`] and the dispatch succeeds immediately. Something else
//! drains the outbox and calls [`OutboxEntry::deliver`] later.
//!
//! ```text
//! publish ─▶ chain ─▶ OutboxInvoker ──append──▶ Outbox
//!                          ╳ (never calls)        │
//!                     real invoker ◀──deliver()───┘ (outbox consumer)
//! ```

mod entry;
mod error;
mod in_memory;
mod invoker;
#[cfg(feature = "codec")]
mod record;

pub use entry::{Outbox, OutboxEntry};
pub use error::OutboxError;
pub use in_memory::InMemoryOutbox;
pub use invoker::OutboxInvoker;
#[cfg(feature = "codec")]
pub use record::OutboxRecord;
