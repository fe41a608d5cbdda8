//! Deferring handlers through an outbox.

use std::sync::Arc;

use sourced_dispatch::{
    Command, DispatchError, Dispatcher, HandlerError, InMemoryOutbox, Invoker, MessageType,
    Outbox, OutboxEntry, OutboxError, OutboxInvoker,
};

use crate::support::{entries, journal, Marker, OrderHandler, OrderPlaced, RecordingCallback};

/// Refuses every entry.
struct ClosedOutbox;

impl Outbox for ClosedOutbox {
    fn append(&self, _entry: OutboxEntry) -> Result<(), OutboxError> {
        Err(OutboxError::Rejected("outbox is closed".into()))
    }
}

// ============================================================================
// Builder-configured outbox
// ============================================================================

#[test]
fn dispatch_appends_instead_of_handling() {
    let outbox = InMemoryOutbox::new();
    let handler = Arc::new(OrderHandler::default());
    let dispatcher = Dispatcher::builder()
        .outbox(Arc::new(outbox.clone()))
        .build();
    dispatcher.subscribe_shared(Arc::clone(&handler));

    let command = Command::new(OrderPlaced::new("o-1", 5));
    let mut callback = RecordingCallback::new();
    dispatcher.publish_command(command.clone(), &mut callback);

    assert_eq!(callback.successes.len(), 1);
    assert!(callback.successes[0].is_empty());
    assert_eq!(handler.placed_calls(), 0);

    let stored = outbox.entries();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].command().ptr_eq(&command));
    assert_eq!(stored[0].message_type(), MessageType::of::<OrderPlaced>());
}

#[test]
fn delivering_an_entry_runs_the_real_handler() {
    let outbox = InMemoryOutbox::new();
    let handler = Arc::new(OrderHandler::default());
    let dispatcher = Dispatcher::builder()
        .outbox(Arc::new(outbox.clone()))
        .build();
    dispatcher.subscribe_shared(Arc::clone(&handler));

    dispatcher.publish_checked(OrderPlaced::new("o-1", 5)).unwrap();
    dispatcher.publish_checked(OrderPlaced::new("o-2", 7)).unwrap();
    assert_eq!(handler.placed_calls(), 0);

    let responses: Vec<String> = outbox
        .drain()
        .unwrap()
        .iter()
        .map(|entry| entry.deliver().unwrap().get::<String>().unwrap())
        .collect();

    assert_eq!(responses, vec!["accepted o-1", "accepted o-2"]);
    assert_eq!(handler.placed_calls(), 2);
    assert!(outbox.is_empty());
}

#[test]
fn interceptors_still_run_before_the_append() {
    let journal = journal();
    let outbox = InMemoryOutbox::new();
    let dispatcher = Dispatcher::builder()
        .interceptor(Marker::new("audit", &journal))
        .outbox(Arc::new(outbox.clone()))
        .build();
    dispatcher.subscribe(OrderHandler::default());

    dispatcher.publish_checked(OrderPlaced::new("o-1", 5)).unwrap();

    assert_eq!(entries(&journal), vec!["audit:in", "audit:out"]);
    assert_eq!(outbox.len(), 1);
}

#[test]
fn deferred_handler_errors_surface_on_delivery() {
    let outbox = InMemoryOutbox::new();
    let dispatcher = Dispatcher::builder()
        .outbox(Arc::new(outbox.clone()))
        .build();
    dispatcher.subscribe(OrderHandler::default());

    // Accepted now; the handler would have rejected it.
    assert!(dispatcher.publish_checked(OrderPlaced::new("o-1", 0)).is_ok());

    let entry = outbox.drain().unwrap().remove(0);
    assert!(entry.deliver().unwrap_err().is_validation());
}

// ============================================================================
// Decorating invokers directly
// ============================================================================

#[test]
fn decorated_invoker_in_a_plain_dispatcher() {
    let outbox = Arc::new(InMemoryOutbox::new());
    let handler = Arc::new(OrderHandler::default());
    let dispatcher = Dispatcher::new();

    let binding = sourced_dispatch::Binding::handler::<OrderPlaced, _>(&handler);
    let (message_type, invoker) = binding.into_parts();
    dispatcher.subscribe_invoker(
        message_type,
        OutboxInvoker::decorate(invoker, Arc::clone(&outbox) as Arc<dyn Outbox>),
    );

    assert!(dispatcher.dispatch(OrderPlaced::new("o-1", 3)).is_success());
    assert_eq!(handler.placed_calls(), 0);
    assert_eq!(outbox.len(), 1);
}

#[test]
fn append_failure_reaches_on_failure() {
    let handler = Arc::new(OrderHandler::default());
    let dispatcher = Dispatcher::builder().outbox(Arc::new(ClosedOutbox)).build();
    dispatcher.subscribe_shared(Arc::clone(&handler));

    let mut callback = RecordingCallback::new();
    dispatcher.publish(OrderPlaced::new("o-1", 5), &mut callback);

    assert_eq!(callback.failures.len(), 1);
    match &callback.failures[0] {
        DispatchError::Handler(HandlerError::Outbox(OutboxError::Rejected(reason))) => {
            assert_eq!(reason, "outbox is closed")
        }
        other => panic!("Expected outbox rejection, got: {:?}", other),
    }
    assert_eq!(handler.placed_calls(), 0);
}

#[test]
fn outbox_invoker_exposes_the_real_invoker() {
    let inner: Arc<dyn Invoker> =
        Arc::new(|_: &Command| -> Result<sourced_dispatch::Response, HandlerError> {
            Ok(sourced_dispatch::Response::new(7u32))
        });
    let decorated = OutboxInvoker::new(Arc::clone(&inner), Arc::new(InMemoryOutbox::new()));

    assert!(Arc::ptr_eq(decorated.inner(), &inner));
    assert_eq!(
        decorated
            .inner()
            .invoke(&Command::new(()))
            .unwrap()
            .get::<u32>(),
        Some(7)
    );
}
