//! `switchyard-events` — in-process event routing.
//!
//! Three dispatch disciplines, one per type:
//!
//! - [`EventBus`]: exactly one [`Handler`] per event name (mediator shape)
//! - [`SubscriptionRegistry`]: every [`Subscriber`] is told (observer shape)
//! - [`HandlerChain`]: an ordered pipeline of gated [`ChainLink`]s
//!   (chain-of-responsibility shape)
//!
//! [`Router`] composes the three behind one façade without conflating them.
//!
//! Everything is synchronous and runs on the caller's thread. All types are
//! `Send + Sync`; structural mutation is serialized by a lock while dispatch
//! runs against an immutable snapshot.

pub mod bus;
pub mod chain;
pub mod handler;
pub mod registry;
pub mod router;

mod snapshot;

pub use bus::{Dispatched, EventBus};
pub use chain::{ChainLink, ChainReport, ChainStop, Flow, FnLink, HandlerChain, LinkPolicy, LinkVisit, Step};
pub use handler::Handler;
pub use registry::{Subscriber, SubscriptionRegistry};
pub use router::Router;

pub use switchyard_core::{Event, EventId, RouterConfig, RouterError, RouterResult, UnhandledEvent};
