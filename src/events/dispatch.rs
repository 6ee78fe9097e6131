//! # Fault-isolated fan-out to listeners.
//!
//! Every listener of a dispatch runs in insertion order with the same arguments.
//! Each invocation produces a [`ListenerOutcome`]; failures are handed to the
//! [`ErrorSink`] and never stop the remaining listeners.
//!
//! ```text
//! dispatch(args)
//!     │
//!     ├──► listener[0](args) ──► Ok
//!     ├──► listener[1](args) ──► Err / panic ──► ErrorSink::log_error
//!     └──► listener[N](args) ──► Ok
//!                │
//!                ▼
//!          DispatchReport { outcomes: [Ok, Failed, Ok] }
//! ```
//!
//! ## Panic handling
//! With `Config::catch_panics` set, panics are caught via `catch_unwind` and turned into
//! [`ListenerError::Panicked`].
//!
//! **Warning**: `AssertUnwindSafe` is used, which can leave shared state inconsistent
//! if a listener panics while holding a lock of its own.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::bridge::ErrorSink;
use crate::error::ListenerError;
use crate::events::Listener;

/// Result of invoking a single listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    /// Listener returned normally.
    Ok,
    /// Listener failed; the error was already sent to the sink.
    Failed(ListenerError),
}

impl ListenerOutcome {
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, ListenerOutcome::Ok)
    }
}

/// Per-listener outcomes of one dispatch, in invocation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    outcomes: Vec<ListenerOutcome>,
}

impl DispatchReport {
    /// Number of listeners invoked.
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.outcomes.len()
    }

    /// Iterates `(position, error)` for every failed listener.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ListenerError)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(i, o)| match o {
                ListenerOutcome::Failed(err) => Some((i, err)),
                ListenerOutcome::Ok => None,
            })
    }

    /// True if every listener succeeded (vacuously true for no listeners).
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(ListenerOutcome::is_ok)
    }

    pub fn outcomes(&self) -> &[ListenerOutcome] {
        &self.outcomes
    }
}

/// Invokes `listeners` in order, isolating failures.
pub(crate) fn fan_out(
    event: Option<&str>,
    listeners: &[Listener],
    args: &[Value],
    catch_panics: bool,
    sink: &dyn ErrorSink,
) -> DispatchReport {
    let mut outcomes = Vec::with_capacity(listeners.len());

    for (index, listener) in listeners.iter().enumerate() {
        let result = if catch_panics {
            match panic::catch_unwind(AssertUnwindSafe(|| listener.call(args))) {
                Ok(result) => result,
                Err(payload) => Err(ListenerError::Panicked {
                    info: panic_message(payload.as_ref()),
                }),
            }
        } else {
            listener.call(args)
        };

        match result {
            Ok(()) => outcomes.push(ListenerOutcome::Ok),
            Err(err) => {
                sink.log_error(event, index, &err);
                outcomes.push(ListenerOutcome::Failed(err));
            }
        }
    }

    DispatchReport { outcomes }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct Collect(Mutex<Vec<(usize, String)>>);

    impl ErrorSink for Collect {
        fn log_error(&self, _event: Option<&str>, index: usize, err: &ListenerError) {
            self.0.lock().push((index, err.as_label().to_string()));
        }
    }

    #[test]
    fn test_failures_do_not_stop_fan_out() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s1 = seen.clone();
        let s3 = seen.clone();

        let listeners = vec![
            Listener::from_fn(move |args| s1.lock().push(("first", args.to_vec()))),
            Listener::new(|_| Err(ListenerError::fail("nope"))),
            Listener::from_fn(|_| panic!("kaboom")),
            Listener::from_fn(move |args| s3.lock().push(("last", args.to_vec()))),
        ];
        let sink = Collect::default();

        let report = fan_out(Some("x"), &listeners, &[json!(7)], true, &sink);

        assert_eq!(report.invoked(), 4);
        assert!(!report.is_clean());
        let failed: Vec<usize> = report.failures().map(|(i, _)| i).collect();
        assert_eq!(failed, vec![1, 2]);
        assert_eq!(
            report.outcomes()[2],
            ListenerOutcome::Failed(ListenerError::Panicked {
                info: "kaboom".into()
            })
        );

        assert_eq!(
            *seen.lock(),
            vec![("first", vec![json!(7)]), ("last", vec![json!(7)])]
        );
        assert_eq!(
            *sink.0.lock(),
            vec![
                (1, "listener_failed".to_string()),
                (2, "listener_panicked".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_is_clean() {
        let report = fan_out(None, &[], &[], true, &Collect::default());
        assert_eq!(report.invoked(), 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_panic_with_formatted_message() {
        let listeners = vec![Listener::from_fn(|_| panic!("code {}", 42))];
        let report = fan_out(None, &listeners, &[], true, &Collect::default());
        let (_, err) = report.failures().next().unwrap();
        assert_eq!(
            *err,
            ListenerError::Panicked {
                info: "code 42".into()
            }
        );
    }

    #[test]
    fn test_panics_propagate_when_not_caught() {
        let listeners = vec![Listener::from_fn(|_| panic!("loud"))];
        let sink = Collect::default();
        let res = panic::catch_unwind(AssertUnwindSafe(|| {
            fan_out(None, &listeners, &[], false, &sink)
        }));
        assert!(res.is_err());
        assert!(sink.0.lock().is_empty());
    }
}
