//! Insult Aggregation Service Library

pub mod aggregation;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod messaging;
pub mod observability;
pub mod resilience;
pub mod upstream;

pub use aggregation::InsultService;
pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
