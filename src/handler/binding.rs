use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::invoker::{FnInvoker, HandlerInvoker, Handles, Invoker};
use crate::command::MessageType;
use crate::error::HandlerError;

/// A `(message type, invoker)` pair ready to be subscribed.
#[derive(Clone)]
pub struct Binding {
    message_type: MessageType,
    invoker: Arc<dyn Invoker>,
}

impl Binding {
    pub fn new(message_type: MessageType, invoker: Arc<dyn Invoker>) -> Self {
        Self {
            message_type,
            invoker,
        }
    }

    /// Bind `handler`'s `Handles<M>` implementation.
    pub fn handler<M, H>(handler: &Arc<H>) -> Self
    where
        M: Any + Send + Sync,
        H: Handles<M>,
    {
        Self::new(
            MessageType::of::<M>(),
            Arc::new(HandlerInvoker::<H, M>::new(Arc::clone(handler))),
        )
    }

    /// Bind a closure over the message body.
    pub fn from_fn<M, T, F>(handler: F) -> Self
    where
        M: Any + Send + Sync,
        T: Any + Send + Sync,
        F: Fn(&M) -> Result<T, HandlerError> + Send + Sync + 'static,
    {
        Self::new(MessageType::of::<M>(), Arc::new(FnInvoker::new(handler)))
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn invoker(&self) -> &Arc<dyn Invoker> {
        &self.invoker
    }

    pub fn into_parts(self) -> (MessageType, Arc<dyn Invoker>) {
        (self.message_type, self.invoker)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("message_type", &self.message_type)
            .finish_non_exhaustive()
    }
}

/// Enumerates the message handlers a handler object provides.
///
/// This is the discovery seam: the dispatcher never inspects a handler, it
/// only registers the bindings its source reports. Implement it by hand or
/// with the [`handlers!`](crate::handlers) macro.
pub trait HandlerSource: Send + Sync + 'static {
    fn bindings(self: Arc<Self>) -> Vec<Binding>;
}

/// Implement [`HandlerSource`] for a handler type from the messages it handles.
///
/// The type must implement [`Handles<M>`](crate::Handles) for every listed message.
///
/// ```
/// use sourced_dispatch::{handlers, Dispatcher, Handles, HandlerError};
///
/// struct OpenAccount;
/// struct CloseAccount;
/// struct Accounts;
///
/// impl Handles<OpenAccount> for Accounts {
///     type Output = ();
///     fn handle(&self, _: &OpenAccount) -> Result<(), HandlerError> { Ok(()) }
/// }
///
/// impl Handles<CloseAccount> for Accounts {
///     type Output = ();
///     fn handle(&self, _: &CloseAccount) -> Result<(), HandlerError> { Ok(()) }
/// }
///
/// handlers!(Accounts => [OpenAccount, CloseAccount]);
///
/// let dispatcher = Dispatcher::new();
/// dispatcher.subscribe(Accounts);
/// assert_eq!(dispatcher.registry().len(), 2);
/// ```
#[macro_export]
macro_rules! handlers {
    ($handler:ty => [ $($message:ty),+ $(,)? ]) => {
        impl $crate::HandlerSource for $handler {
            fn bindings(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::vec::Vec<$crate::Binding> {
                ::std::vec![
                    $( $crate::Binding::handler::<$message, $handler>(&self) ),+
                ]
            }
        }
    };
}
