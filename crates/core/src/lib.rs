//! `switchyard-core` — event router building blocks.
//!
//! This crate contains the **pure data** shared by the router: events, their
//! identifiers, the error model, and configuration. Dispatch mechanics live in
//! `switchyard-events`.

pub mod config;
pub mod error;
pub mod event;
pub mod id;

pub use config::{LogFormat, RouterConfig, UnhandledPolicy};
pub use error::{RouterError, RouterResult, UnhandledEvent};
pub use event::Event;
pub use id::EventId;
