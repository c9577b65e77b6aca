//! Static mapping sources.
//!
//! # Data Flow
//! ```text
//! source file (JSON/YAML)
//!     → json.rs / yaml.rs (decode into path → URL pairs)
//!     → Mapping (immutable once built)
//!     → resolver chain (unsynchronized concurrent reads)
//! ```
//!
//! # Design Decisions
//! - Loaders consume an already-open reader; file opening stays in lifecycle
//! - Decoding is atomic: an error yields no partial Mapping
//! - Duplicate paths within one source resolve to the last value seen

pub mod json;
pub mod yaml;

use std::collections::HashMap;

pub use json::load_json;
pub use yaml::load_yaml;

/// In-memory path → destination URL map, built once at startup and read-only
/// for the life of the process.
pub type Mapping = HashMap<String, String>;

/// Decode failure for a static mapping source.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON mapping: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML mapping: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
