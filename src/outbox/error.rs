//! Error types for outbox operations.

/// Failure to hand an entry to the outbox, or to encode one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OutboxError {
    #[error("outbox lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// The outbox refused the entry (full, closed, unavailable).
    #[error("outbox rejected entry: {0}")]
    Rejected(String),
    #[error("outbox payload encoding failed: {0}")]
    Encode(String),
    #[error("outbox entry holds a {actual} message, not {expected}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

#[cfg(feature = "codec")]
impl From<bitcode::Error> for OutboxError {
    fn from(err: bitcode::Error) -> Self {
        OutboxError::Encode(err.to_string())
    }
}
