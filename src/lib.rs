mod callback;
mod command;
mod dispatcher;
mod error;
mod handler;
mod interceptor;
mod outbox;
mod registry;

pub use callback::{Callback, FailFastCallback, Outcome, OutcomeCallback};
pub use command::{Command, CommandMetadata, MessageType, Response};
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use error::{BoxError, DispatchError, HandlerError, ValidationError, Violation};
pub use handler::{Binding, FnInvoker, HandlerInvoker, HandlerSource, Handles, Invoker};
pub use interceptor::{Chain, Interceptor, LoggingInterceptor, ValidatingInterceptor};
pub use registry::HandlerRegistry;
pub use outbox::{InMemoryOutbox, Outbox, OutboxEntry, OutboxError, OutboxInvoker};
#[cfg(feature = "codec")]
pub use outbox::OutboxRecord;
