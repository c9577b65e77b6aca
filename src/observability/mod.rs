//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request handlers → tracing events (request ID, matched source)
//!                  → metrics.rs (counters, histograms)
//!
//! stats reporter   → periodic counter deltas on stderr
//! Prometheus       → optional scrape endpoint (metrics.rs)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing, written to stderr so the diagnostic
//!   side-channel stays out of stdout
//! - The store's stats reporter is independent of these metrics; it speaks
//!   only through tracing events

pub mod metrics;
