use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{RouterError, RouterResult};
use crate::id::EventId;

/// A named unit of information dispatched through the router.
///
/// Events are:
/// - **immutable** (fields are private; there are no setters)
/// - **transient** (created per dispatch call, dropped once handling completes)
/// - **case-sensitive** on `name`, which is the only dispatch key
///
/// The `payload` is opaque to the router. `id` and `occurred_at` exist for
/// trace correlation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    occurred_at: DateTime<Utc>,
    name: String,
    payload: JsonValue,
}

impl Event {
    /// Create an event stamped with a fresh id and the current time.
    pub fn new(name: impl Into<String>, payload: impl Into<JsonValue>) -> Self {
        Self::with_metadata(EventId::new(), Utc::now(), name, payload)
    }

    /// Create an event with a `null` payload.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, JsonValue::Null)
    }

    /// Like [`Event::new`], but rejects names that cannot be dispatched.
    pub fn try_new(name: impl Into<String>, payload: impl Into<JsonValue>) -> RouterResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RouterError::invalid_event_name(name));
        }
        Ok(Self::new(name, payload))
    }

    /// Create an event with explicit metadata (deterministic; useful in tests).
    pub fn with_metadata(
        id: EventId,
        occurred_at: DateTime<Utc>,
        name: impl Into<String>,
        payload: impl Into<JsonValue>,
    ) -> Self {
        Self {
            id,
            occurred_at,
            name: name.into(),
            payload: payload.into(),
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    /// Payload as a string slice, if it is a JSON string.
    pub fn payload_str(&self) -> Option<&str> {
        self.payload.as_str()
    }

    /// Whether the payload is, or contains, the given string.
    ///
    /// Matches a string payload exactly, or any element of an array payload.
    pub fn payload_contains(&self, needle: &str) -> bool {
        match &self.payload {
            JsonValue::String(s) => s == needle,
            JsonValue::Array(items) => items.iter().any(|v| v.as_str() == Some(needle)),
            _ => false,
        }
    }

    pub fn into_payload(self) -> JsonValue {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn try_new_rejects_blank_names() {
        assert_eq!(
            Event::try_new("  ", JsonValue::Null),
            Err(RouterError::InvalidEventName("  ".to_string()))
        );
        assert!(Event::try_new("save", JsonValue::Null).is_ok());
    }

    #[test]
    fn payload_contains_matches_whole_elements_only() {
        let event = Event::new("login", json!(["unauthorized", "save"]));
        assert!(!event.payload_contains("authorized"));
        assert!(event.payload_contains("save"));

        let event = Event::new("login", "authorized");
        assert!(event.payload_contains("authorized"));

        let event = Event::new("login", json!({ "authorized": true }));
        assert!(!event.payload_contains("authorized"));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = Event::new("order", json!({ "lines": [{ "sku": "A-1" }] }));
        let mut payload = original.clone().into_payload();
        payload["lines"][0]["sku"] = json!("B-2");

        assert_eq!(original.payload()["lines"][0]["sku"], json!("A-1"));
        assert_eq!(payload["lines"][0]["sku"], json!("B-2"));
    }

    #[test]
    fn serializes_with_all_fields() {
        let id = EventId::new();
        let at = Utc::now();
        let event = Event::with_metadata(id, at, "save", json!("doc"));

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["name"], json!("save"));
        assert_eq!(value["payload"], json!("doc"));
        assert_eq!(value["id"], json!(id.to_string()));

        let back: Event = serde_json::from_value(value).unwrap();
        assert_eq!(back, event);
    }

    proptest! {
        /// Property: an array payload contains exactly the strings it holds,
        /// compared case-sensitively.
        #[test]
        fn payload_contains_agrees_with_array_membership(
            items in prop::collection::vec("[a-zA-Z]{1,6}", 0..8),
            needle in "[a-zA-Z]{1,6}",
        ) {
            let event = Event::new("request", json!(items));
            prop_assert_eq!(event.payload_contains(&needle), items.contains(&needle));
        }
    }
}
