//! # Collaborators at the edge of the hub.
//!
//! The hub never delivers notifications across process or context boundaries itself.
//! It talks to three collaborators, each behind a trait:
//!
//! ```text
//!            attach / detach                       inbound text
//!  Event ─────────────────────► Transport    host ──────────────► ArgDecoder
//!                               (subscribe /                      (payload → Vec<Value>)
//!                                unsubscribe)
//!
//!  dispatch ── listener failure ──► ErrorSink
//! ```
//!
//! Built-ins:
//! - [`NoopTransport`]: ignores subscription changes (in-process use only).
//! - [`JsonDecoder`]: decodes a JSON array into an argument list.
//! - [`TracingSink`]: reports listener failures with `tracing::error!`.
//!
//! With the `inbound` feature, [`inbound`] provides a channel-fed async pump that
//! forwards host notifications into [`Hub::notify_by_name`](crate::Hub::notify_by_name).

#[cfg(feature = "inbound")]
pub mod inbound;
mod log;

pub use log::TracingSink;

use serde_json::Value;

use crate::error::{DecodeError, ListenerError};

/// Host side of named subscriptions.
///
/// Called once per attach (`subscribe`) and once per detach (`unsubscribe`).
/// Anonymous events are reported too, with `name = None`.
///
/// ### Implementation requirements
/// - Do not add or remove listeners on the same event from here; its transition
///   guard is held.
/// - Dispatching to the event (e.g. flushing a pending notification through
///   [`Hub::dispatch_by_name`](crate::Hub::dispatch_by_name)) and reading its state are fine.
/// - Do not panic; there is no way to report a failure.
pub trait Transport: Send + Sync + 'static {
    /// Start forwarding notifications for `name`.
    fn subscribe(&self, name: Option<&str>);

    /// Stop forwarding notifications for `name`.
    fn unsubscribe(&self, name: Option<&str>);
}

/// Transport that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransport;

impl Transport for NoopTransport {
    fn subscribe(&self, _name: Option<&str>) {}

    fn unsubscribe(&self, _name: Option<&str>) {}
}

/// Turns an encoded inbound payload into an argument list.
pub trait ArgDecoder: Send + Sync + 'static {
    /// Decodes `encoded`. Failures abort the notification.
    fn decode(&self, encoded: &str) -> Result<Vec<Value>, DecodeError>;
}

/// Decodes a JSON array: `"[1,2]"` → `[1, 2]`.
///
/// JSON `null` decodes to an empty argument list; any other non-array value is rejected.
///
/// ## Example
/// ```rust
/// use eventbind::{ArgDecoder, JsonDecoder};
/// use serde_json::json;
///
/// let args = JsonDecoder.decode(r#"[1, "two"]"#).unwrap();
/// assert_eq!(args, vec![json!(1), json!("two")]);
/// assert!(JsonDecoder.decode("{}").is_err());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDecoder;

impl ArgDecoder for JsonDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<Value>, DecodeError> {
        match serde_json::from_str::<Value>(encoded)? {
            Value::Array(args) => Ok(args),
            Value::Null => Ok(Vec::new()),
            other => Err(DecodeError::NotAnArray {
                found: kind_of(&other),
            }),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Receives listener failures caught during dispatch.
///
/// Must not panic: it runs inside the dispatch loop.
pub trait ErrorSink: Send + Sync + 'static {
    /// Reports that the listener at `index` of `event` failed with `err`.
    fn log_error(&self, event: Option<&str>, index: usize, err: &ListenerError);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_decoder_array() {
        assert_eq!(
            JsonDecoder.decode("[1,2]").unwrap(),
            vec![json!(1), json!(2)]
        );
        assert_eq!(JsonDecoder.decode("[]").unwrap(), Vec::<Value>::new());
    }

    #[test]
    fn test_json_decoder_null_is_empty() {
        assert!(JsonDecoder.decode("null").unwrap().is_empty());
    }

    #[test]
    fn test_json_decoder_rejects_non_array() {
        let err = JsonDecoder.decode(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray { found: "object" }));

        let err = JsonDecoder.decode("42").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray { found: "number" }));
    }

    #[test]
    fn test_json_decoder_rejects_malformed() {
        let err = JsonDecoder.decode("[1,").unwrap_err();
        assert_eq!(err.as_label(), "decode_malformed");
    }
}
