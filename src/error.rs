//! Error types used by the event hub, its events and their listeners.
//!
//! This module defines three enums:
//!
//! - [`EventError`]: failures surfaced to the caller of an event operation
//!   (lifecycle invariant violations and undecodable inbound payloads).
//! - [`DecodeError`]: an inbound argument payload could not be turned into an argument list.
//! - [`ListenerError`]: a single listener failed during dispatch. These are never
//!   propagated; they are handed to the [`ErrorSink`](crate::ErrorSink) and recorded
//!   in the [`DispatchReport`](crate::DispatchReport).
//!
//! All of them provide `as_label` (stable snake_case, for logs/metrics) and `as_message`.

use thiserror::Error;

/// # Errors returned by event operations.
///
/// `DuplicateName` and `NotAttached` indicate a programming error in the caller
/// (two events competing for one name, or an event and its registry out of sync).
/// `Decode` aborts a single inbound notification.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EventError {
    /// Attach attempted while another event already owns the name.
    #[error("event '{name}' is already attached")]
    DuplicateName {
        /// The contested event name.
        name: String,
    },

    /// Detach attempted for a name the registry does not bind to this event.
    #[error("event '{name}' is not attached")]
    NotAttached {
        /// The event name.
        name: String,
    },

    /// Inbound arguments could not be decoded; no listener was invoked.
    #[error("cannot decode arguments for '{name}': {source}")]
    Decode {
        /// Name the notification was addressed to.
        name: String,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },
}

impl EventError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use eventbind::EventError;
    ///
    /// let err = EventError::DuplicateName { name: "tab-changed".into() };
    /// assert_eq!(err.as_label(), "event_duplicate_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::DuplicateName { .. } => "event_duplicate_name",
            EventError::NotAttached { .. } => "event_not_attached",
            EventError::Decode { .. } => "event_decode_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            EventError::DuplicateName { name } => format!("duplicate name: {name}"),
            EventError::NotAttached { name } => format!("not attached: {name}"),
            EventError::Decode { name, source } => {
                format!("decode failed for {name}: {}", source.as_message())
            }
        }
    }

    /// True for errors that signal a broken attach/detach lifecycle.
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            EventError::DuplicateName { .. } | EventError::NotAttached { .. }
        )
    }
}

/// # Errors produced while decoding an inbound argument payload.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Payload is not well-formed.
    #[error("malformed payload: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },

    /// Payload is well-formed but is not an argument list.
    #[error("expected an argument array, found {found}")]
    NotAnArray {
        /// Kind of value that was found instead.
        found: &'static str,
    },

    /// Payload exceeds the configured size limit.
    #[error("payload of {len} bytes exceeds limit of {limit} bytes")]
    TooLarge {
        /// Payload length in bytes.
        len: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

impl DecodeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            DecodeError::Malformed { .. } => "decode_malformed",
            DecodeError::NotAnArray { .. } => "decode_not_an_array",
            DecodeError::TooLarge { .. } => "decode_too_large",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            DecodeError::Malformed { reason } => format!("malformed: {reason}"),
            DecodeError::NotAnArray { found } => format!("not an array: {found}"),
            DecodeError::TooLarge { len, limit } => format!("too large: {len} > {limit}"),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Malformed {
            reason: err.to_string(),
        }
    }
}

/// # Failure of a single listener invocation.
///
/// Listeners return `Err(ListenerError::Failed { .. })` to report a failure;
/// `Panicked` is produced by the dispatcher when a listener panics.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListenerError {
    /// Listener returned an error.
    #[error("listener failed: {error}")]
    Failed {
        /// The underlying error message.
        error: String,
    },

    /// Listener panicked.
    #[error("listener panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },
}

impl ListenerError {
    /// Shorthand for [`ListenerError::Failed`].
    ///
    /// # Example
    /// ```
    /// use eventbind::ListenerError;
    ///
    /// let err = ListenerError::fail("boom");
    /// assert_eq!(err.as_label(), "listener_failed");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ListenerError::Failed {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ListenerError::Failed { .. } => "listener_failed",
            ListenerError::Panicked { .. } => "listener_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ListenerError::Failed { error } => format!("error: {error}"),
            ListenerError::Panicked { info } => format!("panic: {info}"),
        }
    }
}
