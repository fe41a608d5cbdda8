//! Shared messages, handlers and probes for dispatcher tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sourced_dispatch::{
    handlers, Callback, Chain, Command, DispatchError, HandlerError, Handles, Interceptor,
    Response, ValidationError,
};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct OrderPlaced {
    pub order_id: String,
    pub amount: i64,
}

impl OrderPlaced {
    pub fn new(order_id: &str, amount: i64) -> Self {
        Self {
            order_id: order_id.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCancelled {
    pub order_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefundRequested {
    pub order_id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Handles order messages and counts how often each handler ran.
#[derive(Default)]
pub struct OrderHandler {
    pub placed: AtomicUsize,
    pub cancelled: AtomicUsize,
}

impl OrderHandler {
    pub fn placed_calls(&self) -> usize {
        self.placed.load(Ordering::SeqCst)
    }

    pub fn cancelled_calls(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Handles<OrderPlaced> for OrderHandler {
    type Output = String;

    fn handle(&self, message: &OrderPlaced) -> Result<String, HandlerError> {
        self.placed.fetch_add(1, Ordering::SeqCst);
        if message.amount <= 0 {
            return Err(ValidationError::field("amount", "must be positive").into());
        }
        if message.order_id == "explode" {
            return Err(HandlerError::msg("inventory service unavailable"));
        }
        Ok(format!("accepted {}", message.order_id))
    }
}

impl Handles<OrderCancelled> for OrderHandler {
    type Output = ();

    fn handle(&self, _message: &OrderCancelled) -> Result<(), HandlerError> {
        self.cancelled.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

handlers!(OrderHandler => [OrderPlaced, OrderCancelled]);

// ============================================================================
// Callback probe
// ============================================================================

/// Records every callback invocation.
#[derive(Default)]
pub struct RecordingCallback {
    pub successes: Vec<Response>,
    pub failures: Vec<DispatchError>,
    pub validation_failures: Vec<Command>,
}

impl RecordingCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_calls(&self) -> usize {
        self.successes.len() + self.failures.len() + self.validation_failures.len()
    }
}

impl Callback for RecordingCallback {
    fn on_success(&mut self, response: Response) {
        self.successes.push(response);
    }

    fn on_failure(&mut self, error: DispatchError) {
        self.failures.push(error);
    }

    fn on_validation_failure(&mut self, command: Command) {
        self.validation_failures.push(command);
    }
}

// ============================================================================
// Interceptor probe
// ============================================================================

pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Writes `name:in` before and `name:out` after proceeding.
pub struct Marker {
    pub name: String,
    pub journal: Journal,
}

impl Marker {
    pub fn new(name: impl Into<String>, journal: &Journal) -> Self {
        Self {
            name: name.into(),
            journal: Arc::clone(journal),
        }
    }
}

impl Interceptor for Marker {
    fn intercept(&self, chain: &mut Chain<'_>) -> Result<Response, HandlerError> {
        self.journal.lock().unwrap().push(format!("{}:in", self.name));
        let result = chain.proceed();
        self.journal.lock().unwrap().push(format!("{}:out", self.name));
        result
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// Counts `WARN` events.
#[derive(Clone, Default)]
pub struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber that counts warnings, returning the count.
pub fn count_warnings(f: impl FnOnce()) -> usize {
    let counter = WarnCounter::default();
    let subscriber = tracing_subscriber::registry().with(counter.clone());
    tracing::subscriber::with_default(subscriber, f);
    counter.count()
}
