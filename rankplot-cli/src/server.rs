//! HTTP simulation server
//!
//! Exposes the simulation engine over HTTP:
//!
//! - `POST /simulate` takes simulation parameters and answers with the results document
//! - `GET /health` answers `{"status":"ok"}`

use anyhow::{Context, Result};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rankplot_common::{RankplotError, SimulationResults};
use rankplot_sim::{SimulationParams, Simulator};
use serde::Serialize;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

/// Error returned by request handlers
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    field: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<RankplotError> for ApiError {
    fn from(err: RankplotError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let field = match &err {
            RankplotError::Validation { field, .. } => field.clone(),
            _ => None,
        };

        Self {
            status,
            message: err.to_string(),
            field,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
            field: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "Request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "Request rejected");
        }

        let body = ErrorBody {
            error: self.message,
            field: self.field,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Create the router with all endpoints
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/simulate", post(simulate))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn simulate(
    payload: std::result::Result<Json<SimulationParams>, JsonRejection>,
) -> std::result::Result<Json<SimulationResults>, ApiError> {
    let Json(params) = payload?;
    params.validate()?;

    let results = tokio::task::spawn_blocking(move || Simulator::for_params(&params).run(&params))
        .await
        .map_err(|e| RankplotError::with_source("Simulation task failed", e))??;

    info!(
        records = results.len(),
        top5_probability = results.top5_probability,
        "Simulation request served"
    );
    Ok(Json(results))
}

/// Bind `bind` and serve until Ctrl-C.
pub async fn serve(bind: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address '{bind}'"))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "Simulation server listening");

    axum::serve(listener, create_router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Simulation server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}
