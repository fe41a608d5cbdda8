//! Handlers and the invokers that call them.
//!
//! A handler implements [`Handles<M>`] for each message type it accepts.
//! Registration works on [`Binding`]s, `(MessageType, Arc<dyn Invoker>)`
//! pairs, so the dispatcher never needs to know the concrete handler type.
//!
//! ```text
//! handler object ──HandlerSource::bindings()──▶ [Binding] ──subscribe──▶ HandlerRegistry
//!                                                   │
//!                                      HandlerInvoker<H, M> / FnInvoker
//! ```

mod binding;
mod invoker;

pub use binding::{Binding, HandlerSource};
pub use invoker::{FnInvoker, HandlerInvoker, Handles, Invoker};
