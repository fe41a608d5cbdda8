//! Dispatcher - the synchronous command bus.
//!
//! ## Quick Start
//!
//! ```
//! use sourced_dispatch::{Dispatcher, HandlerError, Outcome};
//!
//! struct PlaceOrder { sku: String, quantity: u32 }
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.subscribe_fn(|cmd: &PlaceOrder| {
//!     Ok::<_, HandlerError>(format!("{} x{}", cmd.sku, cmd.quantity))
//! });
//!
//! match dispatcher.dispatch(PlaceOrder { sku: "tea".into(), quantity: 2 }) {
//!     Outcome::Succeeded(response) => {
//!         assert_eq!(response.get::<String>().as_deref(), Some("tea x2"))
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```

mod builder;
#[allow(clippy::module_inception)]
mod dispatcher;

pub use builder::DispatcherBuilder;
pub use dispatcher::Dispatcher;
