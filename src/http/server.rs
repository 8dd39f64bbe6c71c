//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the insult and health handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::aggregation::InsultService;
use crate::config::ServiceConfig;
use crate::health::HealthReporter;
use crate::http::handlers;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<InsultService>,
    pub health: Arc<HealthReporter>,
}

/// HTTP server for the insult service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an already-wired aggregator.
    pub fn new(config: &ServiceConfig, service: Arc<InsultService>) -> Self {
        let health = Arc::new(HealthReporter::new(
            service.noun_breaker(),
            service.adj_breaker(),
        ));
        let state = AppState { service, health };

        let router = Router::new()
            .route("/api/v1/insult", get(handlers::get_insult))
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Serve connections until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await
    }
}
