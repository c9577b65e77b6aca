//! Semantic configuration checks.
//!
//! Serde handles syntax; this pass rejects configs that parse cleanly but
//! cannot run. All failures are collected so a bad config reports everything
//! wrong with it at once.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single failed semantic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate semantic constraints on a parsed configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: {}", config.listener.bind_address),
        ));
    }

    if config.sources.json_path.is_empty() {
        errors.push(ValidationError::new("sources.json_path", "must not be empty"));
    }
    if config.sources.yaml_path.is_empty() {
        errors.push(ValidationError::new("sources.yaml_path", "must not be empty"));
    }

    if config.storage.db_path.is_empty() {
        errors.push(ValidationError::new("storage.db_path", "must not be empty"));
    }
    if config.storage.stats_interval_secs == 0 {
        errors.push(ValidationError::new(
            "storage.stats_interval_secs",
            "must be at least one second",
        ));
    }
    for (i, seed) in config.storage.seed.iter().enumerate() {
        if seed.path.is_empty() || seed.url.is_empty() {
            errors.push(ValidationError::new(
                "storage.seed",
                format!("record {i} must have a non-empty path and url"),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be at least one second",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
