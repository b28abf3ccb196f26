//! Router error model.

use thiserror::Error;

/// Result type used across the router crates.
pub type RouterResult<T> = Result<T, RouterError>;

/// No handler is registered under the dispatched event name.
///
/// This is a soft failure: the bus reports it back to the caller, who decides
/// whether to log it, ignore it, or escalate it with `?`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unhandled event: {name}")]
pub struct UnhandledEvent {
    name: String,
}

impl UnhandledEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Router-level error.
///
/// None of these are fatal to the process. Duplicate subscriptions, removal of
/// absent subscribers and exhausted chains are normal outcomes and therefore
/// have no variant here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// Dispatch found no handler for the event name.
    #[error(transparent)]
    Unhandled(#[from] UnhandledEvent),

    /// An event name failed validation (e.g. empty).
    #[error("invalid event name: {0:?}")]
    InvalidEventName(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RouterError {
    pub fn unhandled(name: impl Into<String>) -> Self {
        Self::Unhandled(UnhandledEvent::new(name))
    }

    pub fn invalid_event_name(name: impl Into<String>) -> Self {
        Self::InvalidEventName(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unhandled_event_displays_name() {
        let err = UnhandledEvent::new("checkout");
        assert_eq!(err.to_string(), "unhandled event: checkout");
        assert_eq!(err.name(), "checkout");
    }

    #[test]
    fn router_error_is_transparent_over_unhandled() {
        let err = RouterError::unhandled("checkout");
        assert_eq!(err.to_string(), "unhandled event: checkout");
        assert_eq!(err, RouterError::from(UnhandledEvent::new("checkout")));
    }
}
