//! Request handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::server::AppState;

/// `GET /api/v1/insult` — aggregate a fresh insult.
///
/// Dependency failure never reaches this handler; the aggregate resolves with
/// sentinel values instead. A 500 here means a wiring bug, not a bad upstream.
pub async fn get_insult(State(state): State<AppState>) -> Response {
    match state.service.aggregate().await {
        Ok(insult) => {
            state.service.publish(insult.clone());
            (StatusCode::OK, Json(insult)).into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "aggregation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "aggregation failed").into_response()
        }
    }
}

/// `GET /health` — breaker-state snapshot.
///
/// The HTTP status reflects whether both circuits are fully closed; the body's
/// `status` field keeps its own legacy polarity (see the health reporter).
pub async fn health(State(state): State<AppState>) -> Response {
    let report = state.health.check().await;
    let code = if report.all_closed() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report)).into_response()
}
