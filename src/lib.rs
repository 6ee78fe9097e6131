//! # eventbind
//!
//! **eventbind** lets independent pieces of code register interest in a logically
//! named event (`"tab-changed"`), receive callbacks when it fires, and bridge that
//! event to an external notification source identified only by its name.
//!
//! The crate guarantees three things:
//! - exactly one live [`Event`] owns a given name at a time;
//! - the external subscription is toggled exactly on the `0 → 1` and `1 → 0`
//!   listener-count transitions;
//! - dispatch is fault-isolated: one failing listener never stops the others.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │    Event     │   │    Event     │   │    Event     │
//!     │"tab-changed" │   │ "tab-closed" │   │ (anonymous)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ add/remove listener (0 ↔ 1)         │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Hub                                                              │
//! │  - Registry   (name → attached Event, Weak)                       │
//! │  - Transport  (subscribe / unsubscribe by name)                   │
//! │  - ArgDecoder (encoded payload → Vec<Value>)                      │
//! │  - ErrorSink  (listener failures)                                 │
//! └──────┬──────────────────────────────────────────────▲─────────────┘
//!        │ subscribe("tab-changed")                     │ notify_by_name("tab-changed", "[1,2]")
//!        ▼                                              │
//!   ┌───────────────────────────────────────────────────┴──┐
//!   │             host / transport (external)              │
//!   └──────────────────────────────────────────────────────┘
//! ```
//!
//! ### Dispatch
//! ```text
//! notify_by_name(name, payload)
//!   ├─► Registry::lookup(name) ── None ──► no-op
//!   ├─► ArgDecoder::decode(payload) ── Err ──► EventError::Decode (no listener runs)
//!   └─► Event::dispatch(args)
//!         ├─► listener[0](args) ── Ok
//!         ├─► listener[1](args) ── Err/panic ──► ErrorSink::log_error, continue
//!         └─► listener[N](args) ── Ok
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                        |
//! |-------------------|--------------------------------------------------------------|-------------------------------------------|
//! | **Events**        | Named/anonymous channels with ordered listeners.             | [`Event`], [`Listener`]                   |
//! | **Name binding**  | One owner per name, attach/detach on 0 ↔ 1 transitions.     | [`Registry`], [`Attachment`]              |
//! | **Dispatch**      | Fault-isolated fan-out with per-listener outcomes.           | [`DispatchReport`], [`ListenerOutcome`]   |
//! | **Collaborators** | Pluggable transport, decoder and error sink.                 | [`Transport`], [`ArgDecoder`], [`ErrorSink`] |
//! | **Errors**        | Typed errors for lifecycle, decoding and listeners.          | [`EventError`], [`DecodeError`], [`ListenerError`] |
//! | **Configuration** | Panic isolation and payload limits.                          | [`Config`]                                |
//!
//! ## Optional features
//! - `inbound` _(default)_: tokio-based [`InboundPump`] fed by an [`InboundSender`].
//!
//! ## Example
//! ```rust
//! use eventbind::{Config, Hub, Listener, ListenerError};
//!
//! let hub = Hub::new(Config::default());
//!
//! let on_tab_changed = hub.named("tab-changed");
//! on_tab_changed
//!     .add_listener(Listener::from_fn(|args| println!("tab changed: {args:?}")))
//!     .unwrap();
//! on_tab_changed
//!     .add_listener(Listener::new(|_| Err(ListenerError::fail("flaky"))))
//!     .unwrap();
//!
//! // a second owner for the same name is rejected
//! let rival = hub.named("tab-changed");
//! assert!(rival.add_listener(Listener::from_fn(|_| {})).is_err());
//!
//! let report = hub.notify_by_name("tab-changed", Some(r#"[3, "active"]"#))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(report.invoked(), 2);
//! assert_eq!(report.failures().count(), 1);
//! ```
mod bridge;
mod config;
mod core;
mod error;
mod events;

// ---- Public re-exports ----

pub use bridge::{ArgDecoder, ErrorSink, JsonDecoder, NoopTransport, TracingSink, Transport};
pub use config::Config;
pub use core::{Hub, HubBuilder, Registry};
pub use error::{DecodeError, EventError, ListenerError};
pub use events::{Attachment, DispatchReport, Event, Listener, ListenerOutcome, Transition};
pub use serde_json::Value;

// Optional: channel-fed inbound delivery.
// Enabled by default; disable with `default-features = false`.
#[cfg(feature = "inbound")]
pub use bridge::inbound::{InboundError, InboundPump, InboundSender, Notification, Payload};
