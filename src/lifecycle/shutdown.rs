//! Graceful-shutdown fan-out.
//!
//! `main` hands one receiver to `HttpServer::run` and one clone of the
//! handle to the signal task. Tests keep their own handle and call
//! `trigger` to stop a relay spawned on an ephemeral port.

use tokio::sync::broadcast;

/// Cloneable handle that stops every relay server subscribed to it.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for `HttpServer::run`; pass it through [`wait`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop accepting connections and let in-flight relays finish.
    /// Calling it with no server subscribed is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Servers still waiting on this handle.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve once `rx` fires or its sender is gone.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
