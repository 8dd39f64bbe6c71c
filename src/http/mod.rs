//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: timeout, request ID, trace)
//!     → handlers.rs (aggregate or report health)
//!     → JSON response to client
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
