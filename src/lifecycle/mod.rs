//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Build breakers and clients → Serve
//!
//! Shutdown:
//!     Signal received → Broadcast → Server drains → Exit
//! ```
//!
//! # Design Decisions
//! - Long-lived tasks subscribe to one broadcast channel
//! - SIGTERM and Ctrl-C both trigger graceful shutdown

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
