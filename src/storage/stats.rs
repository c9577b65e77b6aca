//! Store engine counters and the background stats reporter.
//!
//! # Responsibilities
//! - Track per-engine activity counters (transactions, hits, misses)
//! - Periodically emit counter deltas on the diagnostic side-channel
//! - Stop promptly when the owning store signals cancellation
//!
//! # Design Decisions
//! - Counters are the engine's own atomics; the reporter only ever reads them
//! - Deltas, not absolutes: each tick reports activity since the previous tick
//! - Cancellation exits the loop without a final emission

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

/// Activity counters maintained by the store while serving transactions.
#[derive(Debug, Default)]
pub struct StoreStats {
    read_txns: AtomicU64,
    write_txns: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StoreStats {
    /// Record one completed read transaction and whether the key was found.
    pub fn record_get(&self, hit: bool) {
        self.read_txns.fetch_add(1, Ordering::Relaxed);
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one committed write transaction.
    pub fn record_put(&self) {
        self.write_txns.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            read_txns: self.read_txns.load(Ordering::Relaxed),
            write_txns: self.write_txns.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Counter values captured at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub read_txns: u64,
    pub write_txns: u64,
    pub hits: u64,
    pub misses: u64,
}

impl StatsSnapshot {
    /// Activity between `prev` and this snapshot.
    pub fn delta(&self, prev: &StatsSnapshot) -> StatsSnapshot {
        StatsSnapshot {
            read_txns: self.read_txns.saturating_sub(prev.read_txns),
            write_txns: self.write_txns.saturating_sub(prev.write_txns),
            hits: self.hits.saturating_sub(prev.hits),
            misses: self.misses.saturating_sub(prev.misses),
        }
    }
}

/// Background task emitting periodic counter deltas.
///
/// Spawned by the store on open; runs until the store's shutdown channel
/// fires. Never touches the database itself, so it cannot block readers or
/// writers.
pub struct StatsReporter {
    stats: Arc<StoreStats>,
    interval: Duration,
}

impl StatsReporter {
    pub fn new(stats: Arc<StoreStats>, interval: Duration) -> Self {
        Self { stats, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let mut prev = self.stats.snapshot();
        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately; consume it so the first
        // report lands one full interval after open.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let current = self.stats.snapshot();
                    let delta = current.delta(&prev);
                    tracing::info!(
                        target: "redirector::storage::stats",
                        read_txns = delta.read_txns,
                        write_txns = delta.write_txns,
                        hits = delta.hits,
                        misses = delta.misses,
                        "store activity"
                    );
                    prev = current;
                }
                _ = shutdown.recv() => {
                    tracing::debug!("stats reporter received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let stats = StoreStats::default();
        stats.record_get(true);
        stats.record_get(false);
        stats.record_put();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.read_txns, 2);
        assert_eq!(snapshot.write_txns, 1);
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 1);
    }

    #[test]
    fn delta_reports_activity_since_previous_snapshot() {
        let stats = StoreStats::default();
        stats.record_put();
        let first = stats.snapshot();

        stats.record_put();
        stats.record_get(true);
        let second = stats.snapshot();

        let delta = second.delta(&first);
        assert_eq!(delta.write_txns, 1);
        assert_eq!(delta.read_txns, 1);
        assert_eq!(delta.hits, 1);
        assert_eq!(delta.misses, 0);
    }

    #[tokio::test]
    async fn reporter_exits_on_shutdown_signal() {
        let (tx, rx) = broadcast::channel(1);
        let reporter = StatsReporter::new(Arc::new(StoreStats::default()), Duration::from_secs(3600));
        let handle = tokio::spawn(reporter.run(rx));

        tx.send(()).unwrap();

        time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("reporter did not stop after shutdown signal")
            .unwrap();
    }
}
