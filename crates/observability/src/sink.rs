//! Logging sink for published events.

use switchyard_events::{Event, Subscriber};

/// Subscriber that writes every published event to the tracing pipeline.
///
/// Subscribe it like any other observer; it never influences routing.
#[derive(Debug, Clone)]
pub struct TraceSubscriber {
    label: String,
    include_payload: bool,
}

impl TraceSubscriber {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            include_payload: true,
        }
    }

    /// Omit payloads from the log line (e.g. when they may carry secrets).
    pub fn without_payload(mut self) -> Self {
        self.include_payload = false;
        self
    }

    /// The human-readable line this sink logs for `event`.
    pub fn line(&self, event: &Event) -> String {
        if self.include_payload {
            format!("[{}] {} {}", self.label, event.name(), event.payload())
        } else {
            format!("[{}] {}", self.label, event.name())
        }
    }
}

impl Subscriber for TraceSubscriber {
    fn receive(&self, event: &Event) {
        ::tracing::info!(event_id = %event.id(), occurred_at = %event.occurred_at(), "{}", self.line(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use switchyard_events::Router;

    #[test]
    fn line_includes_payload_by_default() {
        let sink = TraceSubscriber::new("audit");
        let event = Event::new("save", "doc-1");
        assert_eq!(sink.line(&event), r#"[audit] save "doc-1""#);
    }

    #[test]
    fn line_can_omit_payload() {
        let sink = TraceSubscriber::new("audit").without_payload();
        let event = Event::new("login", "hunter2");
        assert_eq!(sink.line(&event), "[audit] login");
    }

    #[test]
    fn subscribes_like_any_observer() {
        let router = Router::default();
        let sink = Arc::new(TraceSubscriber::new("audit"));
        assert!(router.subscribe(sink.clone()));
        assert_eq!(router.publish(&Event::named("tick")), 1);
        assert!(router.unsubscribe(&sink));
    }
}
