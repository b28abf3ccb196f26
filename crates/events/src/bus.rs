//! Named-event dispatch table (single-handler mechanics).
//!
//! The bus maps an event name to exactly one [`Handler`]. Dispatch is a plain
//! lookup by exact, case-sensitive name: there is no pattern matching, no
//! fallback handler and no fan-out. Fan-out lives in
//! [`SubscriptionRegistry`](crate::SubscriptionRegistry); sequential gated
//! handling lives in [`HandlerChain`](crate::HandlerChain).
//!
//! ## Missing handlers
//!
//! Dispatching a name nobody registered is not an error in the Rust sense of
//! the word. The bus returns [`Dispatched::Unhandled`] and leaves the decision
//! to the caller, who can log it, ignore it, or escalate it with
//! [`Dispatched::into_result`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use switchyard_core::{Event, RouterResult, UnhandledEvent};

use crate::handler::Handler;
use crate::snapshot::Snapshot;

/// Outcome of a single-handler dispatch.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// A handler ran; carries whatever it returned.
    Handled(Option<JsonValue>),
    /// No handler is registered under the event name.
    Unhandled(UnhandledEvent),
}

impl Dispatched {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatched::Handled(_))
    }

    /// The handler's return value, if a handler ran and returned one.
    pub fn output(&self) -> Option<&JsonValue> {
        match self {
            Dispatched::Handled(out) => out.as_ref(),
            Dispatched::Unhandled(_) => None,
        }
    }

    /// Escalate `Unhandled` into a [`RouterError`](switchyard_core::RouterError).
    pub fn into_result(self) -> RouterResult<Option<JsonValue>> {
        match self {
            Dispatched::Handled(out) => Ok(out),
            Dispatched::Unhandled(e) => Err(e.into()),
        }
    }
}

/// Registry of named-event handlers.
///
/// - Last write wins: registering under an existing name replaces the old
///   handler, and the replaced handler is returned so the replacement is never
///   silent.
/// - Dispatch is synchronous and runs on the caller's thread.
/// - Safe to share across threads. Dispatch runs against a snapshot of the
///   table, so a handler may register or unregister other handlers (or itself)
///   while it runs; the change applies from the next dispatch.
#[derive(Default)]
pub struct EventBus {
    handlers: Snapshot<HashMap<String, Arc<dyn Handler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `name`, returning the handler it replaced.
    pub fn register<H>(&self, name: impl Into<String>, handler: H) -> Option<Arc<dyn Handler>>
    where
        H: Handler + 'static,
    {
        self.register_arc(name, Arc::new(handler))
    }

    /// Like [`EventBus::register`], for handlers that are already shared.
    pub fn register_arc(
        &self,
        name: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> Option<Arc<dyn Handler>> {
        let name = name.into();
        let replaced = self
            .handlers
            .update(|table| table.insert(name.clone(), handler));

        if replaced.is_some() {
            tracing::debug!("replaced handler for event '{}'", name);
        }
        replaced
    }

    /// Remove the handler for `name`, if any.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.update(|table| table.remove(name))
    }

    /// Invoke the handler registered under `event.name()`.
    pub fn dispatch(&self, event: &Event) -> Dispatched {
        let handler = self.handlers.load().get(event.name()).cloned();

        match handler {
            Some(handler) => Dispatched::Handled(handler.handle(event)),
            None => Dispatched::Unhandled(UnhandledEvent::new(event.name())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.load().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered event names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.load().keys().cloned().collect();
        names.sort();
        names
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.names())
            .finish()
    }
}
