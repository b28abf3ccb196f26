use serde_json::Value as JsonValue;

use switchyard_core::Event;

/// Single designated responder to an event name (handler abstraction).
///
/// A handler is registered on an [`EventBus`](crate::EventBus) under exactly
/// one name and is the only thing that reacts when that name is dispatched.
/// This is the mediator shape: participants do not talk to each other, they
/// notify the bus and exactly one owner reacts.
///
/// The return value is handed back to whoever dispatched the event; `None`
/// means the handler acted purely through side effects.
///
/// Closures taking `&Event` implement this trait directly.
pub trait Handler: Send + Sync {
    fn handle(&self, event: &Event) -> Option<JsonValue>;
}

impl<F> Handler for F
where
    F: Fn(&Event) -> Option<JsonValue> + Send + Sync,
{
    fn handle(&self, event: &Event) -> Option<JsonValue> {
        self(event)
    }
}
