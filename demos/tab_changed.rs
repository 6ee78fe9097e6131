//! Wires a hub to a printing transport, attaches two listeners to "tab-changed"
//! and feeds inbound notifications through the async pump.
//!
//! Run with: `RUST_LOG=eventbind=debug cargo run --example tab_changed`

use std::sync::Arc;

use eventbind::{Config, Hub, Listener, ListenerError, Notification, Transport};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Prints subscription changes instead of talking to a real host.
struct PrintTransport;

impl Transport for PrintTransport {
    fn subscribe(&self, name: Option<&str>) {
        println!("[transport] subscribe {name:?}");
    }

    fn unsubscribe(&self, name: Option<&str>) {
        println!("[transport] unsubscribe {name:?}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eventbind=info")),
        )
        .init();

    let hub = Hub::builder(Config::default())
        .with_transport(Arc::new(PrintTransport))
        .build();

    let on_tab_changed = hub.named("tab-changed");
    let printer = Listener::from_fn(|args| println!("[listener] tab changed: {args:?}"));
    let picky = Listener::new(|args| match args.first().and_then(|v| v.as_i64()) {
        Some(id) if id >= 0 => Ok(()),
        _ => Err(ListenerError::fail("expected a non-negative tab id")),
    });

    on_tab_changed.add_listener(printer.clone())?;
    on_tab_changed.add_listener(picky.clone())?;

    // A second owner for the same name is a programming error.
    let rival = hub.named("tab-changed");
    if let Err(err) = rival.add_listener(Listener::from_fn(|_| {})) {
        println!("[demo] rejected rival: {err}");
    }

    let (tx, pump) = hub.inbound(32);
    let token = CancellationToken::new();
    let worker = tokio::spawn(pump.run(token.clone()));

    tx.send(Notification::encoded("tab-changed", Some("[3, \"active\"]")))
        .await?;
    tx.send(Notification::encoded("tab-changed", Some("[-1]"))).await?;
    tx.send(Notification::encoded("tab-changed", Some("not json")))
        .await?;
    tx.send(Notification::args("tab-closed", vec![json!(3)])).await?;
    drop(tx);

    let delivered = worker.await?;
    println!("[demo] delivered {delivered} notification(s)");

    on_tab_changed.remove_listener(&picky)?;
    on_tab_changed.remove_listener(&printer)?;
    Ok(())
}
