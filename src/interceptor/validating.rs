use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use super::chain::{Chain, Interceptor};
use crate::command::{Command, MessageType, Response};
use crate::error::{HandlerError, ValidationError};

type Rule = Box<dyn Fn(&Command) -> Result<(), ValidationError> + Send + Sync>;

/// Checks messages against per-type rules before the rest of the chain runs.
///
/// Rules are fixed at construction. Messages without rules pass through.
/// A failing rule stops the dispatch with [`HandlerError::Validation`].
///
/// ```
/// use sourced_dispatch::{ValidatingInterceptor, ValidationError};
///
/// struct Transfer { amount: i64 }
///
/// let validator = ValidatingInterceptor::new().rule(|t: &Transfer| {
///     if t.amount > 0 { Ok(()) } else { Err(ValidationError::field("amount", "must be positive")) }
/// });
/// assert_eq!(validator.len(), 1);
/// ```
#[derive(Default)]
pub struct ValidatingInterceptor {
    rules: HashMap<MessageType, Vec<Rule>>,
}

impl ValidatingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule for messages of type `M`. Rules for one type run in the order added.
    pub fn rule<M, F>(mut self, rule: F) -> Self
    where
        M: Any + Send + Sync,
        F: Fn(&M) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        let rule: Rule = Box::new(move |command: &Command| match command.downcast_ref::<M>() {
            Some(message) => rule(message),
            None => Ok(()),
        });
        self.rules
            .entry(MessageType::of::<M>())
            .or_default()
            .push(rule);
        self
    }

    /// Run every rule for the command's type, collecting all violations.
    pub fn validate(&self, command: &Command) -> Result<(), ValidationError> {
        let Some(rules) = self.rules.get(&command.message_type()) else {
            return Ok(());
        };
        let mut collected = ValidationError::new();
        let mut rejected = false;
        for rule in rules {
            if let Err(err) = rule(command) {
                rejected = true;
                for violation in err.violations() {
                    collected.push(violation.field.clone(), violation.reason.clone());
                }
            }
        }
        // A rule may reject without naming a field.
        if rejected {
            Err(collected)
        } else {
            Ok(())
        }
    }

    /// Number of message types with rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Interceptor for ValidatingInterceptor {
    fn intercept(&self, chain: &mut Chain<'_>) -> Result<Response, HandlerError> {
        self.validate(chain.command())?;
        chain.proceed()
    }
}

impl fmt::Debug for ValidatingInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatingInterceptor")
            .field("message_types", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
