//! Commands - the envelope every dispatch carries.
//!
//! A message is any `Send + Sync + 'static` value. Wrapping it in a
//! [`Command`] records its [`MessageType`] (the dispatch key) and attaches
//! [`CommandMetadata`]. Handlers answer with a type-erased [`Response`].

#[allow(clippy::module_inception)]
mod command;
mod message_type;
mod metadata;
mod response;

pub use command::Command;
pub use message_type::MessageType;
pub use metadata::CommandMetadata;
pub use response::Response;
