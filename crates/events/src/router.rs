//! Router façade over the three dispatch disciplines.
//!
//! | entry point | discipline | backed by |
//! |---|---|---|
//! | [`Router::notify`] / [`Router::dispatch`] | single designated handler | [`EventBus`] |
//! | [`Router::publish`] | fan-out to every subscriber | [`SubscriptionRegistry`] |
//! | [`Router::route`] | sequential gated handling | [`HandlerChain`] |
//!
//! The router never picks a discipline on the caller's behalf. They are
//! semantically distinct (one owner reacts, everyone is told, or a pipeline
//! decides), and callers choose the one their use case needs.
//!
//! A process normally builds one router during setup and passes it around by
//! reference (or `Arc<Router>` when shared). Nothing here is global.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use switchyard_core::{Event, RouterConfig, UnhandledPolicy};

use crate::bus::{Dispatched, EventBus};
use crate::chain::{ChainLink, ChainReport, HandlerChain};
use crate::handler::Handler;
use crate::registry::{Subscriber, SubscriptionRegistry};

#[derive(Debug, Default)]
pub struct Router {
    config: RouterConfig,
    bus: EventBus,
    subscribers: SubscriptionRegistry,
    chain: HandlerChain,
}

impl Router {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            bus: EventBus::new(),
            subscribers: SubscriptionRegistry::new(),
            chain: HandlerChain::new(),
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn subscribers(&self) -> &SubscriptionRegistry {
        &self.subscribers
    }

    pub fn chain(&self) -> &HandlerChain {
        &self.chain
    }

    /// Register the single handler for `name` (see [`EventBus::register`]).
    pub fn register<H>(&self, name: impl Into<String>, handler: H) -> Option<Arc<dyn Handler>>
    where
        H: Handler + 'static,
    {
        self.bus.register(name, handler)
    }

    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> bool {
        self.subscribers.subscribe(subscriber)
    }

    pub fn unsubscribe<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber + ?Sized,
    {
        self.subscribers.unsubscribe(subscriber)
    }

    pub fn append<L>(&self, link: L)
    where
        L: ChainLink + 'static,
    {
        self.chain.append(link);
    }

    /// Build an event from `name` and `payload` and dispatch it to its handler.
    pub fn notify(&self, name: impl Into<String>, payload: impl Into<JsonValue>) -> Dispatched {
        self.dispatch(&Event::new(name, payload))
    }

    /// Dispatch a pre-built event to its single handler.
    ///
    /// An unhandled event is logged according to [`RouterConfig::unhandled`]
    /// and returned either way.
    pub fn dispatch(&self, event: &Event) -> Dispatched {
        let span = tracing::debug_span!("router.notify", event = %event.name(), event_id = %event.id());
        let _enter = span.enter();

        let outcome = self.bus.dispatch(event);
        if let Dispatched::Unhandled(e) = &outcome {
            match self.config.unhandled {
                UnhandledPolicy::Warn => tracing::warn!("{}", e),
                UnhandledPolicy::Ignore => tracing::trace!("{}", e),
            }
        }
        outcome
    }

    /// Fan `event` out to every subscriber; returns how many were notified.
    pub fn publish(&self, event: &Event) -> usize {
        let span = tracing::debug_span!("router.publish", event = %event.name(), event_id = %event.id());
        let _enter = span.enter();

        let notified = self.subscribers.publish(event);
        tracing::debug!("published '{}' to {} subscriber(s)", event.name(), notified);
        notified
    }

    /// Walk the handler chain from its head.
    pub fn route(&self, event: &Event) -> ChainReport {
        let span = tracing::debug_span!("router.route", event = %event.name(), event_id = %event.id());
        let _enter = span.enter();

        let report = self.chain.handle(event);
        tracing::debug!("routed '{}': {:?}", event.name(), report.stop);
        report
    }
}
