//! Interceptors - middleware around every dispatch.
//!
//! ```text
//! publish ──▶ [A] ──▶ [B] ──▶ [C] ──▶ invoker
//!             in       in      in        │
//!  outcome ◀─ [A] ◀── [B] ◀── [C] ◀──────┘
//!             out      out     out
//! ```
//!
//! The interceptor list is fixed when the dispatcher is built. Each dispatch
//! walks it with a fresh [`Chain`].

mod chain;
mod logging;
mod validating;

pub use chain::{Chain, Interceptor};
pub use logging::LoggingInterceptor;
pub use validating::ValidatingInterceptor;
