//! # TracingSink: listener failure reporter
//!
//! Writes each caught listener failure as a `tracing` error event.
//!
//! ## Example output
//! ```text
//! ERROR eventbind: listener failed event="tab-changed" index=1 label="listener_failed" error=error: boom
//! ERROR eventbind: listener failed event=<anonymous> index=0 label="listener_panicked" error=panic: oops
//! ```

use crate::bridge::ErrorSink;
use crate::error::ListenerError;

/// Error sink backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    /// Construct a new [`TracingSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ErrorSink for TracingSink {
    fn log_error(&self, event: Option<&str>, index: usize, err: &ListenerError) {
        tracing::error!(
            target: "eventbind",
            event = event.unwrap_or("<anonymous>"),
            index,
            label = err.as_label(),
            error = %err.as_message(),
            "listener failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_sink_log_error() {
        let sink = TracingSink::new();
        // should not panic, with or without a subscriber installed
        sink.log_error(Some("tab-changed"), 0, &ListenerError::fail("boom"));
        sink.log_error(
            None,
            3,
            &ListenerError::Panicked {
                info: "oops".into(),
            },
        );
    }
}
