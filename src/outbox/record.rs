use std::any::{type_name, Any};
use std::time::SystemTime;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::entry::OutboxEntry;
use super::error::OutboxError;
use crate::command::CommandMetadata;

/// Serializable snapshot of an outbox entry, for outboxes that persist.
///
/// The payload is bitcode-encoded. The invoker is not part of the record;
/// whoever replays it resolves the handler again by `message_type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutboxRecord {
    pub id: String,
    pub message_type: String,
    pub metadata: CommandMetadata,
    pub payload: Vec<u8>,
    pub enqueued_at: SystemTime,
}

impl OutboxRecord {
    /// Decode the payload from bitcode binary format.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, OutboxError> {
        Ok(bitcode::deserialize(&self.payload)?)
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.metadata.correlation_id()
    }
}

impl OutboxEntry {
    /// Encode the entry's message, which must be an `M`, into an [`OutboxRecord`].
    pub fn encode<M: Serialize + Any>(&self) -> Result<OutboxRecord, OutboxError> {
        let command = self.command();
        let message = command
            .downcast_ref::<M>()
            .ok_or(OutboxError::TypeMismatch {
                expected: type_name::<M>(),
                actual: command.message_type().name(),
            })?;
        Ok(OutboxRecord {
            id: command.id().to_string(),
            message_type: command.message_type().name().to_string(),
            metadata: command.metadata().clone(),
            payload: bitcode::serialize(message)?,
            enqueued_at: self.enqueued_at(),
        })
    }
}
