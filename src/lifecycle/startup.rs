//! Startup orchestration.
//!
//! # Responsibilities
//! - Decode the static mapping sources
//! - Open the persistent store and write the seed records
//! - Assemble the resolver chain in precedence order
//!
//! # Design Decisions
//! - Fail fast: any error here is fatal, the server never starts partially
//! - Subsystems initialize in dependency order, not concurrently
//! - Source files are opened here and released by RAII on every exit path

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::resolver::{LookupSource, ResolverChain, StaticSource, StoreSource};
use crate::sources::{load_json, load_yaml, DecodeError, Mapping};
use crate::storage::{RedirectStore, StorageError};

/// Fatal startup failure; the process exits nonzero on any variant.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("could not open source file {path}: {source}")]
    SourceOpen {
        path: String,
        source: std::io::Error,
    },

    #[error("could not decode source file {path}: {source}")]
    SourceDecode { path: String, source: DecodeError },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A fully initialized application: the resolver chain plus the store
/// backing its first source. The store handle is kept so shutdown can close
/// it after the server drains.
pub struct Application {
    pub chain: Arc<ResolverChain>,
    pub store: Arc<RedirectStore>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application").finish_non_exhaustive()
    }
}

/// Initialize all subsystems in dependency order.
///
/// Static sources are decoded first (cheap, read-only), then the store is
/// opened and seeded; the chain is assembled last. Listeners start only
/// after this returns.
pub fn build_application(config: &ServerConfig) -> Result<Application, StartupError> {
    let json_mapping = load_mapping(&config.sources.json_path, load_json)?;
    tracing::info!(
        path = %config.sources.json_path,
        entries = json_mapping.len(),
        "JSON mapping loaded"
    );

    let yaml_mapping = load_mapping(&config.sources.yaml_path, load_yaml)?;
    tracing::info!(
        path = %config.sources.yaml_path,
        entries = yaml_mapping.len(),
        "YAML mapping loaded"
    );

    let store = Arc::new(RedirectStore::open(
        Path::new(&config.storage.db_path),
        Duration::from_secs(config.storage.stats_interval_secs),
    )?);

    for seed in &config.storage.seed {
        store.put(&seed.path, &seed.url)?;
        tracing::debug!(path = %seed.path, url = %seed.url, "seed record written");
    }

    // Evaluation order is startup policy: the store is the most dynamically
    // updatable source, static sources follow, the greeting is the terminal
    // fallback served by the HTTP layer.
    let sources: Vec<Arc<dyn LookupSource>> = vec![
        Arc::new(StoreSource::new(Arc::clone(&store))),
        Arc::new(StaticSource::new("yaml", yaml_mapping)),
        Arc::new(StaticSource::new("json", json_mapping)),
    ];
    let chain = Arc::new(ResolverChain::new(sources));
    tracing::info!(sources = ?chain.source_names(), "resolver chain assembled");

    Ok(Application { chain, store })
}

fn load_mapping<F>(path: &str, load: F) -> Result<Mapping, StartupError>
where
    F: FnOnce(BufReader<File>) -> Result<Mapping, DecodeError>,
{
    let file = File::open(path).map_err(|source| StartupError::SourceOpen {
        path: path.to_string(),
        source,
    })?;

    load(BufReader::new(file)).map_err(|source| StartupError::SourceDecode {
        path: path.to_string(),
        source,
    })
}
