//! Shutdown coordination.

use tokio::sync::broadcast;

/// Coordinator for cooperative cancellation.
///
/// Wraps a broadcast channel that long-lived tasks subscribe to: the HTTP
/// server's drain loop and the store's stats reporter. Each store instance
/// carries its own coordinator, so instances never interfere.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    ///
    /// Must be called before [`trigger`](Self::trigger) for the signal to be
    /// observed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_observe_the_trigger() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.trigger();

        rx.recv().await.unwrap();
    }
}
