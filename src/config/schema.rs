//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! redirector. All types derive Serde traits for deserialization from config
//! files; every section has defaults so a minimal (or absent) config runs.

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static mapping source files.
    pub sources: SourcesConfig,

    /// Persistent store settings.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Static mapping source files, decoded once before the server starts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// JSON mapping file: a flat object of `"path": "url"` pairs.
    pub json_path: String,

    /// YAML mapping file: a sequence of `{path, url}` records.
    pub yaml_path: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            json_path: "paths_to_urls.json".to_string(),
            yaml_path: "path_urls.yaml".to_string(),
        }
    }
}

/// Persistent store settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path; created if absent.
    pub db_path: String,

    /// Stats reporter interval in seconds.
    pub stats_interval_secs: u64,

    /// Records written unconditionally at every startup, overwriting any
    /// prior value at the same path.
    pub seed: Vec<SeedRecord>,
}

/// One path → URL record seeded into the store at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedRecord {
    pub path: String,
    pub url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "redirects.redb".to_string(),
            stats_interval_secs: 10,
            seed: vec![SeedRecord {
                path: "/b".to_string(),
                url: "https://github.com/boltdb/bolt".to_string(),
            }],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
