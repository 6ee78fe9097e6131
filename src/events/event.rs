//! # Event: one named or anonymous channel with an ordered listener list.
//!
//! An [`Event`] is a cheap-to-clone handle; clones share the same listener list.
//! Events are created by a [`Hub`](crate::Hub), which supplies the registry and the
//! collaborators used by the attach/detach protocol.
//!
//! ## Lifecycle
//! ```text
//! add_listener ── count 0 → 1 ──► attach:  Transport::subscribe(name)
//!                                          named? ─► claim name in registry
//!                                                    taken ─► unsubscribe, drop listener, DuplicateName
//!
//! remove_listener ── count 1 → 0 ──► detach: Transport::unsubscribe(name)
//!                                            named? ─► release own binding
//!                                                      missing/foreign ─► NotAttached
//! ```
//!
//! ## Rules
//! - Listener order is insertion order; duplicates are allowed and each is invoked.
//! - `remove_listener` removes the first equal listener only; unknown listeners are a no-op.
//! - `dispatch` works on a snapshot: listeners added or removed by a running listener
//!   take effect on the next dispatch.
//! - An empty name behaves like no name: it is reported to the transport but never
//!   enters the registry.
//! - Dropping the last handle of an attached event detaches it (with a warning).
//! - The transport and the registry are called with the listener list unlocked, so a
//!   transport may dispatch to (or inspect) the event it is being told about.
//!   Attach/detach are still serialized per event by a separate transition guard.
//!
//! ## Example
//! ```rust
//! use eventbind::{Config, Hub, Listener};
//! use serde_json::json;
//!
//! let hub = Hub::new(Config::default());
//! let on_tab_changed = hub.named("tab-changed");
//!
//! on_tab_changed
//!     .add_listener(Listener::from_fn(|args| println!("tab changed: {args:?}")))
//!     .unwrap();
//! assert!(hub.registry().contains("tab-changed"));
//!
//! let report = hub.dispatch_by_name("tab-changed", &[json!("hi")]).unwrap();
//! assert_eq!(report.invoked(), 1);
//! ```

use std::fmt;
use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use parking_lot::Mutex;
use serde_json::Value;

use crate::core::HubContext;
use crate::error::EventError;
use crate::events::dispatch::{self, DispatchReport};
use crate::events::lifecycle::Attachment;
use crate::events::Listener;

/// Process-wide counter for event ids.
static EVENT_ID: AtomicU64 = AtomicU64::new(0);

/// Mutable part of an event, guarded by one lock.
#[derive(Default)]
struct State {
    listeners: Vec<Listener>,
    attachment: Attachment,
}

pub(crate) struct EventInner {
    id: u64,
    name: Option<Arc<str>>,
    state: Mutex<State>,
    /// Held across a whole add/remove, including transport and registry calls.
    /// `state` is never held while calling out.
    transition: Mutex<()>,
    ctx: Arc<HubContext>,
}

/// Handle to an event channel.
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventInner>,
}

impl Event {
    pub(crate) fn new(name: Option<Arc<str>>, ctx: Arc<HubContext>) -> Self {
        Self {
            inner: Arc::new(EventInner {
                id: EVENT_ID.fetch_add(1, AtomicOrdering::Relaxed),
                name,
                state: Mutex::new(State::default()),
                transition: Mutex::new(()),
                ctx,
            }),
        }
    }

    #[inline]
    pub(crate) fn from_inner(inner: Arc<EventInner>) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) fn downgrade(&self) -> Weak<EventInner> {
        Arc::downgrade(&self.inner)
    }

    /// Name given at construction, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// Unique id of this event (shared by its clones).
    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Number of registered listeners, duplicates included.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.state.lock().listeners.len()
    }

    /// True while the event has at least one listener and its attach succeeded.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.state.lock().attachment.is_attached()
    }

    /// Appends `listener`; the first listener attaches the event.
    ///
    /// # Errors
    /// [`EventError::DuplicateName`] if another event is attached under the same name.
    /// The listener is not kept in that case.
    pub fn add_listener(&self, listener: Listener) -> Result<(), EventError> {
        let _transition = self.inner.transition.lock();
        let pending = {
            let mut state = self.inner.state.lock();
            let before = state.listeners.len();
            match state.attachment.on_count_change(before, before + 1) {
                Some(transition) => transition,
                None => {
                    state.listeners.push(listener);
                    return Ok(());
                }
            }
        };

        // attach first: a failed or panicking attach leaves the event untouched
        self.attach()?;

        let mut state = self.inner.state.lock();
        state.listeners.push(listener);
        state.attachment = state.attachment.apply(pending);
        Ok(())
    }

    /// Removes the first listener equal to `listener`; the last one detaches the event.
    ///
    /// Removing a listener that is not registered is a no-op.
    ///
    /// # Errors
    /// [`EventError::NotAttached`] if the registry no longer binds this event's name
    /// to it. The listener is removed and the event is detached regardless.
    pub fn remove_listener(&self, listener: &Listener) -> Result<(), EventError> {
        let _transition = self.inner.transition.lock();
        let (_removed, pending) = {
            let mut state = self.inner.state.lock();
            let Some(idx) = state.listeners.iter().position(|l| l == listener) else {
                return Ok(());
            };

            let before = state.listeners.len();
            let removed = state.listeners.remove(idx);
            let pending = state.attachment.on_count_change(before, before - 1);
            if let Some(transition) = pending {
                state.attachment = state.attachment.apply(transition);
            }
            (removed, pending)
        };

        if pending.is_some() {
            self.detach()?;
        }
        Ok(())
    }

    /// True if a listener equal to `listener` is registered.
    #[must_use]
    pub fn has_listener(&self, listener: &Listener) -> bool {
        self.inner.state.lock().listeners.contains(listener)
    }

    /// Invokes every listener, in insertion order, with `args`.
    ///
    /// Listener failures are isolated: they are sent to the hub's
    /// [`ErrorSink`](crate::ErrorSink) and recorded in the returned report.
    pub fn dispatch(&self, args: &[Value]) -> DispatchReport {
        let snapshot = self.inner.state.lock().listeners.clone();
        let ctx = &self.inner.ctx;
        dispatch::fan_out(
            self.name(),
            &snapshot,
            args,
            ctx.cfg.catch_panics,
            ctx.sink.as_ref(),
        )
    }

    fn attach(&self) -> Result<(), EventError> {
        let inner = &self.inner;
        inner.ctx.transport.subscribe(self.name());
        let Some(name) = inner.bind_name() else {
            tracing::debug!(target: "eventbind", id = inner.id, "anonymous event attached");
            return Ok(());
        };

        if !inner.ctx.registry.try_insert(name, self) {
            // keep transport calls paired
            inner.ctx.transport.unsubscribe(self.name());
            return Err(EventError::DuplicateName {
                name: name.to_string(),
            });
        }
        tracing::debug!(target: "eventbind", id = inner.id, event = name, "event attached");
        Ok(())
    }

    fn detach(&self) -> Result<(), EventError> {
        let inner = &self.inner;
        inner.ctx.transport.unsubscribe(self.name());
        let Some(name) = inner.bind_name() else {
            tracing::debug!(target: "eventbind", id = inner.id, "anonymous event detached");
            return Ok(());
        };

        if !inner.ctx.registry.remove_if_bound(name, inner) {
            return Err(EventError::NotAttached {
                name: name.to_string(),
            });
        }
        tracing::debug!(target: "eventbind", id = inner.id, event = name, "event detached");
        Ok(())
    }
}

impl EventInner {
    /// Name used as registry key; empty names never bind.
    #[inline]
    fn bind_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

impl Drop for EventInner {
    fn drop(&mut self) {
        if !self.state.get_mut().attachment.is_attached() {
            return;
        }

        tracing::warn!(
            target: "eventbind",
            id = self.id,
            event = self.name.as_deref().unwrap_or("<anonymous>"),
            "event dropped while attached; detaching"
        );
        self.ctx.transport.unsubscribe(self.name.as_deref());
        if let Some(name) = self.bind_name() {
            self.ctx.registry.remove_if_bound(name, self);
        }
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Event {}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Event")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("listeners", &state.listeners.len())
            .field("attachment", &state.attachment)
            .finish()
    }
}
