//! Ordered subscriber set for push-style fan-out.

use std::sync::Arc;

use switchyard_core::Event;

use crate::snapshot::Snapshot;

/// One of potentially many fan-out recipients of an event.
///
/// Subscribers cannot influence each other or the publisher: `receive` has no
/// return value, and every subscriber sees the same `&Event`.
///
/// Closures taking `&Event` implement this trait directly.
pub trait Subscriber: Send + Sync {
    fn receive(&self, event: &Event);
}

impl<F> Subscriber for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn receive(&self, event: &Event) {
        self(event)
    }
}

/// In-process pub/sub registry.
///
/// - **Set semantics**: a subscriber (by `Arc` identity) appears at most once.
///   Subscribing twice is a no-op, and so is unsubscribing something absent.
/// - **Ordered**: subscribers are notified in the order they subscribed.
/// - **Snapshot publish**: `publish` iterates over the list as it was when the
///   call started. A subscriber added during a publish misses that event; one
///   removed during a publish still receives it.
#[derive(Default)]
pub struct SubscriptionRegistry {
    subscribers: Snapshot<Vec<Arc<dyn Subscriber>>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `subscriber` unless it is already present.
    ///
    /// Returns `true` if it was added.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> bool {
        self.subscribers.update(|subs| {
            if subs.iter().any(|s| same(s, &subscriber)) {
                return false;
            }
            subs.push(subscriber);
            true
        })
    }

    /// Remove `subscriber` by identity.
    ///
    /// Returns `true` if it was present.
    pub fn unsubscribe<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber + ?Sized,
    {
        self.subscribers.update(|subs| {
            let before = subs.len();
            subs.retain(|s| !same(s, subscriber));
            subs.len() != before
        })
    }

    pub fn contains<S>(&self, subscriber: &Arc<S>) -> bool
    where
        S: Subscriber + ?Sized,
    {
        self.subscribers.load().iter().any(|s| same(s, subscriber))
    }

    /// Deliver `event` to every current subscriber, in subscription order.
    ///
    /// Returns the number of subscribers notified.
    pub fn publish(&self, event: &Event) -> usize {
        let subs = self.subscribers.load();
        for sub in subs.iter() {
            sub.receive(event);
        }
        subs.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for SubscriptionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SubscriptionRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Identity comparison that ignores trait-object metadata.
fn same<S: ?Sized>(registered: &Arc<dyn Subscriber>, candidate: &Arc<S>) -> bool {
    core::ptr::eq(
        Arc::as_ptr(registered).cast::<()>(),
        Arc::as_ptr(candidate).cast::<()>(),
    )
}
