//! Insult Aggregation Service
//!
//! Composes an insult from two upstream word providers (a noun service and an
//! adjective service, the latter asked twice) behind per-dependency circuit
//! breakers, so that a slow or dead dependency degrades the output instead of
//! failing it.
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                INSULT SERVICE                 │
//!   GET /api/v1/insult│  ┌─────────┐   ┌─────────────┐   ┌─────────┐ │
//!   ──────────────────┼─▶│  http   │──▶│ aggregation │──▶│compose  │ │
//!                     │  │ server  │   │   engine    │   │         │ │
//!                     │  └─────────┘   └──────┬──────┘   └─────────┘ │
//!                     │                       │ fan-out ×3           │
//!                     │             ┌─────────┴──────────┐           │
//!                     │             ▼                    ▼           │
//!                     │      ┌────────────┐       ┌────────────┐     │   noun
//!                     │      │noun breaker│──────▶│  upstream  │─────┼──▶ and
//!                     │      │adj breaker │       │  clients   │     │   adjective
//!                     │      └─────┬──────┘       └────────────┘     │   providers
//!   GET /health       │            │ state reads                     │
//!   ──────────────────┼─▶──────────┘                                 │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use insult_service::aggregation::InsultService;
use insult_service::config::loader::load_config;
use insult_service::config::ServiceConfig;
use insult_service::http::HttpServer;
use insult_service::lifecycle::{signals, Shutdown};
use insult_service::messaging::LogPublisher;
use insult_service::observability;

#[derive(Debug, Parser)]
#[command(name = "insult-service", about = "Resilient insult aggregation service")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    observability::logging::init(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        noun_url = %config.noun.base_url,
        adjective_url = %config.adjective.base_url,
        breaker_max_failures = config.breaker.max_failures,
        breaker_timeout_ms = config.breaker.timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let service = Arc::new(InsultService::from_config(&config, Arc::new(LogPublisher))?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(&config, service);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
