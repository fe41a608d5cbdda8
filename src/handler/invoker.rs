use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::command::{Command, Response};
use crate::error::HandlerError;

/// A handler for messages of type `M`.
///
/// One handler type may implement `Handles` for several messages, the same
/// way a service groups related commands:
///
/// ```
/// use sourced_dispatch::{Handles, HandlerError};
///
/// struct PlaceOrder { sku: String }
/// struct CancelOrder { order_id: String }
///
/// struct OrderHandler;
///
/// impl Handles<PlaceOrder> for OrderHandler {
///     type Output = String;
///     fn handle(&self, message: &PlaceOrder) -> Result<String, HandlerError> {
///         Ok(format!("order-for-{}", message.sku))
///     }
/// }
///
/// impl Handles<CancelOrder> for OrderHandler {
///     type Output = ();
///     fn handle(&self, _message: &CancelOrder) -> Result<(), HandlerError> {
///         Ok(())
///     }
/// }
/// ```
pub trait Handles<M: Any + Send + Sync>: Send + Sync + 'static {
    type Output: Any + Send + Sync;

    fn handle(&self, message: &M) -> Result<Self::Output, HandlerError>;
}

/// Calls one specific handler with a command.
///
/// Invokers carry no per-dispatch state; the same invoker serves every
/// dispatch of its message type, possibly from many threads at once.
pub trait Invoker: Send + Sync {
    fn invoke(&self, command: &Command) -> Result<Response, HandlerError>;
}

impl<F> Invoker for F
where
    F: Fn(&Command) -> Result<Response, HandlerError> + Send + Sync,
{
    fn invoke(&self, command: &Command) -> Result<Response, HandlerError> {
        self(command)
    }
}

/// Binds a shared handler to its `Handles<M>` implementation.
pub struct HandlerInvoker<H, M> {
    handler: Arc<H>,
    _message: PhantomData<fn(M)>,
}

impl<H, M> HandlerInvoker<H, M>
where
    H: Handles<M>,
    M: Any + Send + Sync,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self {
            handler,
            _message: PhantomData,
        }
    }

    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }
}

impl<H, M> Invoker for HandlerInvoker<H, M>
where
    H: Handles<M>,
    M: Any + Send + Sync,
{
    fn invoke(&self, command: &Command) -> Result<Response, HandlerError> {
        let message = command
            .expect_type::<M>()
            .map_err(|(expected, actual)| HandlerError::TypeMismatch { expected, actual })?;
        self.handler.handle(message).map(Response::new)
    }
}

/// Adapts a closure over the message body into an invoker.
pub struct FnInvoker<M, T, F> {
    handler: F,
    _message: PhantomData<fn(&M) -> T>,
}

impl<M, T, F> FnInvoker<M, T, F>
where
    M: Any + Send + Sync,
    T: Any + Send + Sync,
    F: Fn(&M) -> Result<T, HandlerError> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _message: PhantomData,
        }
    }
}

impl<M, T, F> Invoker for FnInvoker<M, T, F>
where
    M: Any + Send + Sync,
    T: Any + Send + Sync,
    F: Fn(&M) -> Result<T, HandlerError> + Send + Sync,
{
    fn invoke(&self, command: &Command) -> Result<Response, HandlerError> {
        let message = command
            .expect_type::<M>()
            .map_err(|(expected, actual)| HandlerError::TypeMismatch { expected, actual })?;
        (self.handler)(message).map(Response::new)
    }
}
