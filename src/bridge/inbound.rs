//! # Inbound pump: channel-fed delivery of host notifications.
//!
//! Hosts that receive notifications on another task (socket reader, IPC listener)
//! push them into an [`InboundSender`]; a single [`InboundPump`] drains the queue and
//! calls [`Hub::notify_by_name`] / [`Hub::dispatch_by_name`] one notification at a time.
//!
//! ## Architecture
//! ```text
//! reader task ──► InboundSender::send(Notification) ──► [bounded mpsc] ──► InboundPump::run
//! reader task ──►                                                            │
//!                                                                            ├─► Hub::notify_by_name
//!                                                                            └─► Hub::dispatch_by_name
//! ```
//!
//! ## Rules
//! - **Single consumer**: notifications are delivered in queue order, one at a time.
//! - **Decode errors** are logged and skipped; the pump keeps running.
//! - **Exit**: when every sender is dropped, or the `CancellationToken` is cancelled.
//!
//! ## Example
//! ```rust
//! use eventbind::{Config, Hub, Listener, Notification};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hub = Hub::new(Config::default());
//! let ev = hub.named("tab-changed");
//! ev.add_listener(Listener::from_fn(|args| println!("{args:?}"))).unwrap();
//!
//! let (tx, pump) = hub.inbound(16);
//! tx.send(Notification::encoded("tab-changed", Some("[1,2]"))).await.unwrap();
//! drop(tx);
//!
//! let delivered = pump.run(CancellationToken::new()).await;
//! assert_eq!(delivered, 1);
//! # }
//! ```

use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::Hub;

/// Arguments carried by a [`Notification`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Encoded argument list (or none), decoded by the hub's decoder.
    Encoded(Option<String>),
    /// Already-decoded arguments.
    Args(Vec<Value>),
}

/// One inbound notification addressed by event name.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub name: String,
    pub payload: Payload,
}

impl Notification {
    /// Notification with an encoded payload.
    pub fn encoded(name: impl Into<String>, payload: Option<impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Encoded(payload.map(Into::into)),
        }
    }

    /// Notification with decoded arguments.
    pub fn args(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            payload: Payload::Args(args),
        }
    }
}

/// Errors returned when queueing a notification.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum InboundError {
    /// Queue is at capacity; the notification was not queued.
    #[error("inbound queue full; dropped '{name}'")]
    Full {
        /// Name of the rejected notification.
        name: String,
    },

    /// The pump is gone; the notification was not queued.
    #[error("inbound pump closed; dropped '{name}'")]
    Closed {
        /// Name of the rejected notification.
        name: String,
    },
}

impl InboundError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            InboundError::Full { .. } => "inbound_full",
            InboundError::Closed { .. } => "inbound_closed",
        }
    }
}

/// Cloneable producer side of the inbound queue.
#[derive(Clone, Debug)]
pub struct InboundSender {
    tx: mpsc::Sender<Notification>,
}

impl InboundSender {
    /// Queues `n`, waiting for capacity.
    pub async fn send(&self, n: Notification) -> Result<(), InboundError> {
        self.tx
            .send(n)
            .await
            .map_err(|mpsc::error::SendError(n)| InboundError::Closed { name: n.name })
    }

    /// Queues `n` without waiting.
    pub fn try_send(&self, n: Notification) -> Result<(), InboundError> {
        self.tx.try_send(n).map_err(|e| match e {
            mpsc::error::TrySendError::Full(n) => InboundError::Full { name: n.name },
            mpsc::error::TrySendError::Closed(n) => InboundError::Closed { name: n.name },
        })
    }
}

/// Consumer side of the inbound queue.
pub struct InboundPump {
    hub: Hub,
    rx: mpsc::Receiver<Notification>,
}

impl InboundPump {
    /// Delivers notifications until the queue closes or `token` is cancelled.
    ///
    /// Returns the number of notifications that reached an attached event.
    pub async fn run(self, token: CancellationToken) -> usize {
        let InboundPump { hub, mut rx } = self;
        let mut delivered = 0;
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                msg = rx.recv() => match msg {
                    Some(n) => {
                        if deliver(&hub, n) {
                            delivered += 1;
                        }
                    }
                    None => break,
                }
            }
        }
        tracing::debug!(target: "eventbind", delivered, "inbound pump stopped");
        delivered
    }
}

/// Routes one notification; true if an attached event received it.
fn deliver(hub: &Hub, n: Notification) -> bool {
    match n.payload {
        Payload::Encoded(encoded) => match hub.notify_by_name(&n.name, encoded.as_deref()) {
            Ok(report) => report.is_some(),
            Err(err) => {
                tracing::warn!(
                    target: "eventbind",
                    event = %n.name,
                    label = err.as_label(),
                    error = %err,
                    "inbound notification dropped"
                );
                false
            }
        },
        Payload::Args(args) => hub.dispatch_by_name(&n.name, &args).is_some(),
    }
}

impl Hub {
    /// Creates a bounded inbound queue feeding this hub.
    ///
    /// `capacity` is clamped to a minimum of 1.
    pub fn inbound(&self, capacity: usize) -> (InboundSender, InboundPump) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            InboundSender { tx },
            InboundPump {
                hub: self.clone(),
                rx,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;
    use crate::{Config, Listener};

    #[tokio::test]
    async fn test_pump_delivers_in_order() {
        let hub = Hub::new(Config::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let ev = hub.named("x");
        ev.add_listener(Listener::from_fn(move |args| s.lock().push(args.to_vec())))
            .unwrap();

        let (tx, pump) = hub.inbound(8);
        tx.send(Notification::encoded("x", Some("[1]"))).await.unwrap();
        tx.send(Notification::encoded("x", Some("[1,"))).await.unwrap();
        tx.send(Notification::encoded("nobody", None::<String>)).await.unwrap();
        tx.send(Notification::args("x", vec![json!(2)])).await.unwrap();
        tx.send(Notification::encoded("x", None::<String>)).await.unwrap();
        drop(tx);

        let delivered = pump.run(CancellationToken::new()).await;
        assert_eq!(delivered, 3);
        assert_eq!(
            *seen.lock(),
            vec![vec![json!(1)], vec![json!(2)], vec![]]
        );
    }

    #[tokio::test]
    async fn test_pump_stops_on_cancel() {
        let hub = Hub::new(Config::default());
        let (tx, pump) = hub.inbound(1);
        let token = CancellationToken::new();
        token.cancel();

        assert_eq!(pump.run(token).await, 0);
        drop(tx);
    }

    #[tokio::test]
    async fn test_try_send_full_and_closed() {
        let hub = Hub::new(Config::default());
        let (tx, pump) = hub.inbound(1);

        tx.try_send(Notification::args("a", vec![])).unwrap();
        let err = tx.try_send(Notification::args("b", vec![])).unwrap_err();
        assert!(matches!(err, InboundError::Full { ref name } if name == "b"));

        drop(pump);
        let err = tx.try_send(Notification::args("c", vec![])).unwrap_err();
        assert_eq!(err.as_label(), "inbound_closed");
    }
}
