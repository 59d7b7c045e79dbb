//! HTTP trigger and health surface.
//!
//! A minimal axum server: `GET /health` for liveness probes and
//! `POST /run/{flow}` to trigger a reconciliation run by name. A flow
//! already in flight answers 409; a failed run answers 502 with the
//! error text so cron wrappers and dashboards can alert on it.

use crate::app::Application;
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use folio_core::FlowKind;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Create the axum router.
pub fn create_router(app: Arc<Application>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/run/{flow}", post(trigger_flow))
        .with_state(app)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Trigger a reconciliation run by flow name.
async fn trigger_flow(
    State(app): State<Arc<Application>>,
    Path(flow): Path<String>,
) -> Response {
    let flow: FlowKind = match flow.parse() {
        Ok(flow) => flow,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": format!("unknown flow: {flow}") })),
            )
                .into_response();
        }
    };

    info!(%flow, "HTTP trigger received");
    match app.run_flow(flow).await {
        Ok(reports) => Json(reports).into_response(),
        Err(e @ AppError::FlowBusy(_)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// Run the trigger server until the process exits.
pub async fn run_server(app: Arc<Application>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(port, "Starting trigger server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(app)).await
}
