//! Shutdown coordination for the gateway.
//!
//! `main` owns one [`Shutdown`]; the HTTP server holds a [`ShutdownSignal`]
//! and stops accepting connections once it resolves. Dropping the coordinator
//! counts as a shutdown request, so a server whose owner went away drains too.

use tokio::sync::broadcast;

pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a signal for one long-running task.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every subscribed task to drain.
    pub fn trigger(&self) {
        let listeners = self.tx.send(()).unwrap_or(0);
        tracing::info!(listeners, "Shutdown requested");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// One task's view of the shutdown request.
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl ShutdownSignal {
    /// Resolve on [`Shutdown::trigger`] or when the coordinator is dropped.
    pub async fn recv(mut self) {
        if let Err(broadcast::error::RecvError::Closed) = self.rx.recv().await {
            tracing::debug!("Shutdown coordinator dropped");
        }
    }
}
