use std::sync::Arc;

use super::dispatcher::Dispatcher;
use crate::interceptor::Interceptor;
use crate::outbox::Outbox;
use crate::registry::HandlerRegistry;

/// Configures a [`Dispatcher`].
///
/// ```
/// use std::sync::Arc;
/// use sourced_dispatch::{Dispatcher, HandlerRegistry, InMemoryOutbox, LoggingInterceptor};
///
/// let registry = HandlerRegistry::new();
/// let dispatcher = Dispatcher::builder()
///     .registry(registry.clone())
///     .interceptor(LoggingInterceptor::new())
///     .outbox(Arc::new(InMemoryOutbox::new()))
///     .build();
/// assert_eq!(dispatcher.interceptor_count(), 1);
/// ```
#[derive(Default)]
pub struct DispatcherBuilder {
    registry: Option<HandlerRegistry>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    outbox: Option<Arc<dyn Outbox>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing (possibly shared) registry instead of a fresh one.
    pub fn registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Append an interceptor. Interceptors run in the order they are added.
    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn interceptors<I>(mut self, interceptors: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Interceptor>>,
    {
        self.interceptors.extend(interceptors);
        self
    }

    /// Defer every handler subscribed through this dispatcher via `outbox`.
    ///
    /// Invokers are decorated when they are subscribed; handlers already in a
    /// shared registry are left as they are.
    pub fn outbox(mut self, outbox: Arc<dyn Outbox>) -> Self {
        self.outbox = Some(outbox);
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher::from_parts(
            self.registry.unwrap_or_default(),
            self.interceptors.into(),
            self.outbox,
        )
    }
}
