//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Decode sources → Open store → Seed writes → Assemble chain → Listen
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Drain HTTP → Close store (reporter joined) → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: sources first, store next, listeners last
//! - Ordered shutdown: the store closes only after the server stops, and the
//!   reporter is joined before the store handle can be released

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_application, Application, StartupError};
