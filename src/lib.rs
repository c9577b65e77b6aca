//! URL path → destination redirect server library.
//!
//! Resolves request paths through an ordered chain of lookup sources (a
//! persistent store, then YAML- and JSON-derived static mappings) and
//! issues `302 Found` redirects, falling back to a fixed greeting.

// Core subsystems
pub mod config;
pub mod http;
pub mod resolver;
pub mod sources;
pub mod storage;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
