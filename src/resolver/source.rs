//! Lookup sources the resolver chain evaluates.
//!
//! # Responsibilities
//! - Define the capability a chain participant must provide
//! - Adapt static mappings and the persistent store to that capability
//!
//! # Design Decisions
//! - The trait is the seam: anything answering "path → URL option" can join
//!   the chain, so tests substitute in-memory fakes for the file-backed store
//! - A store read error is logged and treated as a miss; lookup never
//!   surfaces an error to the request path

use std::sync::Arc;

use crate::sources::Mapping;
use crate::storage::RedirectStore;

/// A single place a request path can be resolved against.
pub trait LookupSource: Send + Sync {
    /// Source name for logs and metrics.
    fn name(&self) -> &str;

    /// Resolve a request path to a destination URL, or `None` on a miss.
    fn resolve(&self, path: &str) -> Option<String>;
}

/// Read-only source over a [`Mapping`] decoded at startup.
pub struct StaticSource {
    name: String,
    mapping: Mapping,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, mapping: Mapping) -> Self {
        Self {
            name: name.into(),
            mapping,
        }
    }
}

impl LookupSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, path: &str) -> Option<String> {
        self.mapping.get(path).cloned()
    }
}

/// Live source over the persistent store.
///
/// Every resolve performs a fresh snapshot read, so records written since
/// startup are visible immediately.
pub struct StoreSource {
    store: Arc<RedirectStore>,
}

impl StoreSource {
    pub fn new(store: Arc<RedirectStore>) -> Self {
        Self { store }
    }
}

impl LookupSource for StoreSource {
    fn name(&self) -> &str {
        "store"
    }

    fn resolve(&self, path: &str) -> Option<String> {
        match self.store.get(path) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "store lookup failed, treating as miss");
                None
            }
        }
    }
}
