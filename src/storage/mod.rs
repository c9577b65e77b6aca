//! Persistent storage subsystem.
//!
//! # Data Flow
//! ```text
//! startup:
//!     open database file → spawn stats reporter → seed writes
//!
//! per request:
//!     resolver chain → store.get(path) → snapshot read transaction
//!
//! shutdown:
//!     close() → cancel reporter → join → store marked closed → file released
//! ```
//!
//! # Design Decisions
//! - redb: embedded, transactional, single serial writer, MVCC snapshot reads
//! - Store instances are self-contained; nothing here is process-global
//! - The reporter is the store's only background task and dies with it

pub mod stats;
pub mod store;

pub use stats::{StatsReporter, StatsSnapshot, StoreStats};
pub use store::{RedirectStore, StorageError};
