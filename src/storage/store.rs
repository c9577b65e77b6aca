//! Durable path → URL storage.
//!
//! # Responsibilities
//! - Open or create the transactional database file (owner-only permissions)
//! - Upsert and look up records inside single transactions
//! - Own the background stats reporter for the store's lifetime
//!
//! # Design Decisions
//! - One named table holds all records; it is created lazily on first write
//! - Reads run in snapshot transactions and never observe partial commits
//! - A miss is `Ok(None)`, never an error; the absent-table case folds into it
//! - `close` joins the reporter before the store can be released, and a
//!   closed store fails fast on `get`/`put` instead of touching the engine

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use redb::{Database, ReadableTable, TableDefinition, TableError};
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::lifecycle::Shutdown;
use crate::storage::stats::{StatsReporter, StoreStats};

/// The single table grouping all path → URL records. Keys and values are raw
/// bytes; the table appears in the file on the first committed write.
const PATHS_TO_URLS: TableDefinition<&[u8], &[u8]> = TableDefinition::new("paths_to_urls");

/// Errors from the persistent store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not open store: {0}")]
    Open(#[from] redb::DatabaseError),

    #[error("store transaction failed: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("store table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("store read/write failed: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("store commit failed: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("store is closed")]
    Closed,

    #[error("stats reporter did not stop cleanly: {0}")]
    Reporter(String),
}

/// Transactional file-backed store mapping request paths to destination URLs.
///
/// Each instance owns its database handle, engine counters and reporter task;
/// multiple instances (e.g. in tests) do not interfere.
pub struct RedirectStore {
    db: Database,
    stats: Arc<StoreStats>,
    shutdown: Shutdown,
    reporter: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl RedirectStore {
    /// Open or create the database at `path` and start the stats reporter.
    ///
    /// Must be called from within a Tokio runtime (the reporter is spawned
    /// here, scoped to the returned store).
    pub fn open(path: impl AsRef<Path>, stats_interval: Duration) -> Result<Self, StorageError> {
        let path = path.as_ref();

        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::os::unix::fs::OpenOptionsExt;

            // The engine has no permission parameter; create the file
            // owner-only before it does. Existing files keep their mode.
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .mode(0o600)
                .open(path)?;
        }

        let db = Database::create(path)?;
        tracing::info!(path = %path.display(), "store opened");

        let stats = Arc::new(StoreStats::default());
        let shutdown = Shutdown::new();
        let reporter = StatsReporter::new(Arc::clone(&stats), stats_interval);
        let handle = tokio::spawn(reporter.run(shutdown.subscribe()));

        Ok(Self {
            db,
            stats,
            shutdown,
            reporter: Mutex::new(Some(handle)),
            closed: AtomicBool::new(false),
        })
    }

    /// Upsert `path -> url` in a single read-write transaction.
    pub fn put(&self, path: &str, url: &str) -> Result<(), StorageError> {
        self.ensure_open()?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PATHS_TO_URLS)?;
            table.insert(path.as_bytes(), url.as_bytes())?;
        }
        txn.commit()?;

        self.stats.record_put();
        Ok(())
    }

    /// Look up `path` in a read-only snapshot transaction.
    ///
    /// Returns `Ok(None)` when the key is absent or nothing has been written
    /// yet (the table does not exist before the first `put`).
    pub fn get(&self, path: &str) -> Result<Option<String>, StorageError> {
        self.ensure_open()?;

        let txn = self.db.begin_read()?;
        let table = match txn.open_table(PATHS_TO_URLS) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                self.stats.record_get(false);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let url = table
            .get(path.as_bytes())?
            .map(|guard| String::from_utf8_lossy(guard.value()).into_owned());

        self.stats.record_get(url.is_some());
        Ok(url)
    }

    /// Stop the stats reporter and mark the store closed.
    ///
    /// Waits for the reporter to acknowledge cancellation before returning,
    /// so no diagnostic emission can race the file being released when the
    /// store is dropped. Subsequent `get`/`put` calls fail with
    /// [`StorageError::Closed`]; a second `close` is a no-op.
    pub async fn close(&self) -> Result<(), StorageError> {
        let handle = self.reporter.lock().await.take();
        let Some(handle) = handle else {
            return Ok(());
        };

        self.shutdown.trigger();
        let joined = handle.await;
        self.closed.store(true, Ordering::SeqCst);
        tracing::info!("store closed");

        joined.map_err(|e| StorageError::Reporter(e.to_string()))
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }
}
