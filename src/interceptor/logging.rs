use std::time::Instant;

use tracing::{debug, warn};

use super::chain::{Chain, Interceptor};
use crate::command::Response;
use crate::error::HandlerError;

/// Logs every dispatch that passes through it.
///
/// Start and completion go to `debug`, failures to `warn`. Validation
/// failures are logged at `debug` since they are an expected outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

impl LoggingInterceptor {
    pub fn new() -> Self {
        Self
    }
}

impl Interceptor for LoggingInterceptor {
    fn intercept(&self, chain: &mut Chain<'_>) -> Result<Response, HandlerError> {
        let command = chain.command();
        let started = Instant::now();
        debug!(
            command_id = command.id(),
            message_type = command.message_type().name(),
            "Dispatching {}",
            command.message_type()
        );

        let result = chain.proceed();
        let elapsed = started.elapsed();

        match &result {
            Ok(_) => debug!(
                command_id = command.id(),
                ?elapsed,
                "Finished {}",
                command.message_type()
            ),
            Err(HandlerError::Validation(err)) => debug!(
                command_id = command.id(),
                ?elapsed,
                error = %err,
                "{} rejected",
                command.message_type()
            ),
            Err(err) => warn!(
                command_id = command.id(),
                ?elapsed,
                error = %err,
                "{} failed",
                command.message_type()
            ),
        }

        result
    }
}
