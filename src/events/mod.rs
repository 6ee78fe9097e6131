//! Event channels: listeners, attachment state and dispatch.
//!
//! ## Contents
//! - [`Event`] handle to one named or anonymous channel
//! - [`Listener`] callback value with identity-based equality
//! - [`Attachment`], [`Transition`] the two-state attach/detach machine
//! - [`DispatchReport`], [`ListenerOutcome`] per-listener results of a dispatch
//!
//! See `core/mod.rs` for how events are wired to the registry.

mod dispatch;
mod event;
mod lifecycle;
mod listener;

pub use dispatch::{DispatchReport, ListenerOutcome};
pub use event::Event;
pub(crate) use event::EventInner;
pub use lifecycle::{Attachment, Transition};
pub use listener::Listener;
