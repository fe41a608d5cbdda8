//! Callback routing, the fail-fast publish and precondition checks.

use sourced_dispatch::{Callback, Command, DispatchError, Dispatcher, Outcome, OutcomeCallback};

use crate::support::{OrderHandler, OrderPlaced, RecordingCallback, RefundRequested};

fn dispatcher() -> Dispatcher {
    let dispatcher = Dispatcher::new();
    dispatcher.subscribe(OrderHandler::default());
    dispatcher
}

// ============================================================================
// Exactly one callback method per publish
// ============================================================================

#[test]
fn exactly_one_callback_per_publish() {
    let dispatcher = dispatcher();
    let messages = [
        OrderPlaced::new("ok", 1),
        OrderPlaced::new("invalid", 0),
        OrderPlaced::new("explode", 1),
    ];

    for message in messages {
        let mut callback = RecordingCallback::new();
        dispatcher.publish(message, &mut callback);
        assert_eq!(callback.total_calls(), 1);
    }

    let mut callback = RecordingCallback::new();
    dispatcher.publish(
        RefundRequested {
            order_id: "o-1".into(),
        },
        &mut callback,
    );
    assert_eq!(callback.total_calls(), 1);
}

// ============================================================================
// dispatch returns what a callback would have received
// ============================================================================

#[test]
fn dispatch_matches_callback_routing() {
    let dispatcher = dispatcher();

    for (message, expected) in [
        (OrderPlaced::new("ok", 1), "success"),
        (OrderPlaced::new("invalid", 0), "validation"),
        (OrderPlaced::new("explode", 1), "failure"),
    ] {
        let mut callback = OutcomeCallback::new();
        dispatcher.publish(message.clone(), &mut callback);
        let via_callback = callback.into_outcome().unwrap();
        let direct = dispatcher.dispatch(message);

        for outcome in [via_callback, direct] {
            let kind = match outcome {
                Outcome::Succeeded(_) => "success",
                Outcome::ValidationFailed(_) => "validation",
                Outcome::Failed(_) => "failure",
            };
            assert_eq!(kind, expected);
        }
    }

    assert!(matches!(
        dispatcher.dispatch(RefundRequested {
            order_id: "o-1".into(),
        }),
        Outcome::Failed(DispatchError::HandlerNotFound { .. })
    ));
}

// ============================================================================
// publish_checked: silent on success, raises failures
// ============================================================================

#[test]
fn publish_checked_is_silent_on_success() {
    assert!(dispatcher().publish_checked(OrderPlaced::new("o-1", 5)).is_ok());
}

#[test]
fn publish_checked_raises_not_found() {
    let err = dispatcher()
        .publish_checked(RefundRequested {
            order_id: "o-1".into(),
        })
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn publish_checked_raises_validation_failure() {
    let err = dispatcher()
        .publish_checked(OrderPlaced::new("o-1", -3))
        .unwrap_err();
    match err {
        DispatchError::ValidationFailed { command } => {
            let message = command.downcast_ref::<OrderPlaced>().unwrap();
            assert_eq!(message.amount, -3);
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn publish_checked_raises_handler_failure() {
    let err = dispatcher()
        .publish_checked(OrderPlaced::new("explode", 5))
        .unwrap_err();
    assert!(matches!(err, DispatchError::Handler(_)));
}

// ============================================================================
// publish_erased: preconditions
// ============================================================================

#[test]
fn missing_message_is_a_precondition_error() {
    let dispatcher = dispatcher();
    let mut callback = RecordingCallback::new();

    let err = dispatcher
        .publish_erased(None, Some(&mut callback))
        .unwrap_err();

    assert!(matches!(err, DispatchError::Precondition(_)));
    assert_eq!(callback.total_calls(), 0);
}

#[test]
fn missing_callback_is_a_precondition_error() {
    let handler = std::sync::Arc::new(OrderHandler::default());
    let dispatcher = Dispatcher::new();
    dispatcher.subscribe_shared(std::sync::Arc::clone(&handler));

    let err = dispatcher
        .publish_erased(Some(Command::new(OrderPlaced::new("o-1", 1))), None)
        .unwrap_err();

    assert_eq!(err.to_string(), "precondition failed: The callback cannot be null.");
    assert_eq!(handler.placed_calls(), 0);
}

#[test]
fn erased_publish_dispatches_when_complete() {
    let dispatcher = dispatcher();
    let mut callback = OutcomeCallback::new();

    dispatcher
        .publish_erased(
            Some(Command::new(OrderPlaced::new("o-1", 1))),
            Some(&mut callback as &mut dyn Callback),
        )
        .unwrap();

    assert!(callback.outcome().unwrap().is_success());
}
