use std::sync::Arc;

use crate::bridge::{ArgDecoder, ErrorSink, JsonDecoder, NoopTransport, TracingSink, Transport};
use crate::config::Config;
use crate::core::hub::{Hub, HubContext};
use crate::core::registry::Registry;

/// Builder for constructing a [`Hub`] with custom collaborators.
pub struct HubBuilder {
    cfg: Config,
    registry: Option<Arc<Registry>>,
    transport: Arc<dyn Transport>,
    decoder: Arc<dyn ArgDecoder>,
    sink: Arc<dyn ErrorSink>,
}

impl HubBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            registry: None,
            transport: Arc::new(NoopTransport),
            decoder: Arc::new(JsonDecoder),
            sink: Arc::new(TracingSink),
        }
    }

    /// Sets the transport notified on attach/detach.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Sets the decoder used by [`Hub::notify_by_name`].
    pub fn with_decoder(mut self, decoder: Arc<dyn ArgDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Sets the sink receiving listener failures.
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Uses an existing registry instead of a fresh one.
    ///
    /// Hubs sharing a registry share the name space.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds and returns the Hub instance.
    pub fn build(self) -> Hub {
        Hub::from_context(HubContext {
            cfg: self.cfg,
            registry: self.registry.unwrap_or_default(),
            transport: self.transport,
            decoder: self.decoder,
            sink: self.sink,
        })
    }
}
