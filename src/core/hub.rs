//! # Hub: wires the registry, collaborators and configuration together.
//!
//! The [`Hub`] is the object a host creates at startup. It owns:
//! - the [`Registry`] shared by all events it creates,
//! - the [`Transport`] notified on attach/detach,
//! - the [`ArgDecoder`] used for encoded inbound payloads,
//! - the [`ErrorSink`] receiving listener failures,
//! - the [`Config`].
//!
//! Hubs are independent: two hubs never see each other's names.
//!
//! ## Inbound flow
//! ```text
//! host ── notify_by_name(name, Some("[1,2]")) ──► Registry::lookup(name)
//!                                                   ├─ None ──► no-op (payload not decoded)
//!                                                   └─ Some(event)
//!                                                        ├─ limit check ─► DecodeError::TooLarge
//!                                                        ├─ ArgDecoder::decode ─► DecodeError
//!                                                        └─ Event::dispatch(args) ─► DispatchReport
//! ```
//!
//! Notifications for a name nobody is attached to are dropped, never buffered.

use std::sync::Arc;

use serde_json::Value;

use crate::bridge::{ArgDecoder, ErrorSink, Transport};
use crate::config::Config;
use crate::core::builder::HubBuilder;
use crate::core::registry::Registry;
use crate::error::{DecodeError, EventError};
use crate::events::{DispatchReport, Event};

/// State shared by a hub and every event it creates.
pub(crate) struct HubContext {
    pub(crate) cfg: Config,
    pub(crate) registry: Arc<Registry>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) decoder: Arc<dyn ArgDecoder>,
    pub(crate) sink: Arc<dyn ErrorSink>,
}

/// Entry point for creating events and routing inbound notifications by name.
#[derive(Clone)]
pub struct Hub {
    ctx: Arc<HubContext>,
}

impl Hub {
    /// Returns a builder with default collaborators.
    pub fn builder(cfg: Config) -> HubBuilder {
        HubBuilder::new(cfg)
    }

    /// Creates a hub with default collaborators
    /// (`NoopTransport`, `JsonDecoder`, `TracingSink`, fresh registry).
    pub fn new(cfg: Config) -> Self {
        HubBuilder::new(cfg).build()
    }

    pub(crate) fn from_context(ctx: HubContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Creates an event, named or anonymous. Nothing is registered until its first listener.
    pub fn event(&self, name: Option<&str>) -> Event {
        Event::new(name.map(Arc::from), Arc::clone(&self.ctx))
    }

    /// Creates an event bound (on first listener) to `name`.
    pub fn named(&self, name: impl Into<Arc<str>>) -> Event {
        Event::new(Some(name.into()), Arc::clone(&self.ctx))
    }

    /// Creates an event that never enters the registry.
    pub fn anonymous(&self) -> Event {
        Event::new(None, Arc::clone(&self.ctx))
    }

    /// Registry of attached events, shared by every event this hub creates.
    pub fn registry(&self) -> &Registry {
        &self.ctx.registry
    }

    /// Configuration the hub was built with.
    pub fn config(&self) -> &Config {
        &self.ctx.cfg
    }

    /// Dispatches an inbound notification whose arguments arrive encoded.
    ///
    /// - `encoded = None` → listeners are invoked with no arguments.
    /// - `encoded = Some(text)` → decoded by the hub's [`ArgDecoder`].
    ///
    /// Returns `Ok(None)` when no event is attached under `name`; the payload is not
    /// decoded in that case.
    ///
    /// # Errors
    /// [`EventError::Decode`] if the payload is too large or malformed. No listener runs.
    pub fn notify_by_name(
        &self,
        name: &str,
        encoded: Option<&str>,
    ) -> Result<Option<DispatchReport>, EventError> {
        let Some(event) = self.ctx.registry.lookup(name) else {
            tracing::trace!(target: "eventbind", event = name, "no attached event; dropped");
            return Ok(None);
        };

        let args = match encoded {
            Some(text) => self.decode(text).map_err(|source| EventError::Decode {
                name: name.to_string(),
                source,
            })?,
            None => Vec::new(),
        };

        tracing::debug!(target: "eventbind", event = name, args = args.len(), "inbound dispatch");
        Ok(Some(event.dispatch(&args)))
    }

    /// Dispatches an inbound notification with already-decoded arguments.
    ///
    /// Returns `None` when no event is attached under `name`.
    pub fn dispatch_by_name(&self, name: &str, args: &[Value]) -> Option<DispatchReport> {
        let Some(event) = self.ctx.registry.lookup(name) else {
            tracing::trace!(target: "eventbind", event = name, "no attached event; dropped");
            return None;
        };

        tracing::debug!(target: "eventbind", event = name, args = args.len(), "inbound dispatch");
        Some(event.dispatch(args))
    }

    fn decode(&self, text: &str) -> Result<Vec<Value>, DecodeError> {
        if let Some(limit) = self.ctx.cfg.encoded_limit() {
            if text.len() > limit {
                return Err(DecodeError::TooLarge {
                    len: text.len(),
                    limit,
                });
            }
        }
        self.ctx.decoder.decode(text)
    }
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field("cfg", &self.ctx.cfg)
            .field("registry", &self.ctx.registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use serde_json::{Value, json};

    use crate::{Config, DecodeError, EventError, Hub, Listener};

    fn recording(hub: &Hub, name: &str) -> (crate::Event, Arc<Mutex<Vec<Vec<Value>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let c = calls.clone();
        let ev = hub.named(name.to_string());
        ev.add_listener(Listener::from_fn(move |args| c.lock().push(args.to_vec())))
            .unwrap();
        (ev, calls)
    }

    #[test]
    fn test_notify_without_payload_has_no_args() {
        let hub = Hub::new(Config::default());
        let (_ev, calls) = recording(&hub, "x");

        let report = hub.notify_by_name("x", None).unwrap().unwrap();
        assert_eq!(report.invoked(), 1);
        assert_eq!(*calls.lock(), vec![Vec::<Value>::new()]);
    }

    #[test]
    fn test_notify_decodes_json_array() {
        let hub = Hub::new(Config::default());
        let (_ev, calls) = recording(&hub, "x");

        hub.notify_by_name("x", Some("[1,2]")).unwrap();
        assert_eq!(*calls.lock(), vec![vec![json!(1), json!(2)]]);
    }

    #[test]
    fn test_notify_unknown_name_is_noop() {
        let hub = Hub::new(Config::default());
        assert!(hub.notify_by_name("nobody", Some("[1]")).unwrap().is_none());
        // never decoded, so a bad payload is not an error either
        assert!(hub.notify_by_name("nobody", Some("{{{")).unwrap().is_none());
        assert!(hub.dispatch_by_name("nobody", &[json!(1)]).is_none());
    }

    #[test]
    fn test_malformed_payload_aborts_dispatch() {
        let hub = Hub::new(Config::default());
        let (_ev, calls) = recording(&hub, "x");

        let err = hub.notify_by_name("x", Some("[1,")).unwrap_err();
        assert!(matches!(
            err,
            EventError::Decode { ref name, source: DecodeError::Malformed { .. } } if name == "x"
        ));
        assert!(calls.lock().is_empty());
    }

    #[test]
    fn test_payload_limit() {
        let hub = Hub::new(Config {
            max_encoded_len: 4,
            ..Config::default()
        });
        let (_ev, calls) = recording(&hub, "x");

        hub.notify_by_name("x", Some("[1]")).unwrap();
        let err = hub.notify_by_name("x", Some("[1,2,3]")).unwrap_err();
        assert_eq!(err.as_label(), "event_decode_failed");
        assert_eq!(calls.lock().len(), 1);
    }

    #[test]
    fn test_dispatch_by_name_with_args() {
        let hub = Hub::new(Config::default());
        let (_ev, calls) = recording(&hub, "tab-changed");

        let report = hub.dispatch_by_name("tab-changed", &[json!("hi")]).unwrap();
        assert!(report.is_clean());
        assert_eq!(*calls.lock(), vec![vec![json!("hi")]]);
    }

    #[test]
    fn test_hubs_are_isolated() {
        let a = Hub::new(Config::default());
        let b = Hub::new(Config::default());
        let (_ea, _) = recording(&a, "same");
        let (_eb, _) = recording(&b, "same");

        assert!(a.registry().contains("same"));
        assert!(b.registry().contains("same"));
    }

    #[test]
    fn test_event_constructors() {
        let hub = Hub::new(Config::default());
        assert_eq!(hub.event(Some("n")).name(), Some("n"));
        assert_eq!(hub.event(None).name(), None);
        assert_eq!(hub.anonymous().name(), None);
        assert_eq!(hub.named(String::from("s")).name(), Some("s"));
    }
}
