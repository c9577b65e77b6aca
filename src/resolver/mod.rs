//! Redirect resolution subsystem.
//!
//! # Data Flow
//! ```text
//! request path
//!     → chain.rs (evaluate sources in precedence order)
//!     → source.rs (store read / static map lookup)
//!     → Resolution { url, source } or None (fallthrough)
//! ```
//!
//! # Design Decisions
//! - Precedence is startup configuration, not a property of the sources:
//!   most dynamically updatable first, static sources after
//! - Sources are trait objects; the store is replaceable by any fake
//! - Resolution is pure lookup; the HTTP layer owns the response shape

pub mod chain;
pub mod source;

pub use chain::{Resolution, ResolverChain};
pub use source::{LookupSource, StaticSource, StoreSource};
