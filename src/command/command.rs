use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use super::message_type::MessageType;
use super::metadata::CommandMetadata;

/// A message wrapped for dispatch.
///
/// The body is shared behind an `Arc`, so clones are cheap and all refer to
/// the same message. Use [`Command::ptr_eq`] to check whether two commands
/// are the same dispatch.
#[derive(Clone)]
pub struct Command {
    body: Arc<dyn Any + Send + Sync>,
    message_type: MessageType,
    metadata: Arc<CommandMetadata>,
}

impl Command {
    pub fn new<M: Any + Send + Sync>(message: M) -> Self {
        Self::with_metadata(message, CommandMetadata::new())
    }

    pub fn with_metadata<M: Any + Send + Sync>(message: M, metadata: CommandMetadata) -> Self {
        Self {
            body: Arc::new(message),
            message_type: MessageType::of::<M>(),
            metadata: Arc::new(metadata),
        }
    }

    /// Create a command with a correlation ID header.
    pub fn correlated<M: Any + Send + Sync>(message: M, correlation_id: impl Into<String>) -> Self {
        let mut metadata = CommandMetadata::new();
        metadata.set_header("correlation_id", correlation_id);
        Self::with_metadata(message, metadata)
    }

    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    pub fn body(&self) -> &(dyn Any + Send + Sync) {
        self.body.as_ref()
    }

    pub fn is<M: Any>(&self) -> bool {
        self.message_type.is::<M>()
    }

    /// Borrow the body as `M`, or `None` if the body is another type.
    pub fn downcast_ref<M: Any>(&self) -> Option<&M> {
        self.body.downcast_ref::<M>()
    }

    /// Clone out a shared handle to the body as `M`.
    pub fn downcast_arc<M: Any + Send + Sync>(&self) -> Option<Arc<M>> {
        Arc::clone(&self.body).downcast::<M>().ok()
    }

    /// Whether both commands share the same body and metadata allocation.
    pub fn ptr_eq(&self, other: &Command) -> bool {
        Arc::ptr_eq(&self.body, &other.body) && Arc::ptr_eq(&self.metadata, &other.metadata)
    }

    pub(crate) fn expect_type<M: Any>(&self) -> Result<&M, (&'static str, &'static str)> {
        self.downcast_ref::<M>()
            .ok_or((type_name::<M>(), self.message_type.name()))
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.metadata.id)
            .field("message_type", &self.message_type)
            .finish_non_exhaustive()
    }
}
