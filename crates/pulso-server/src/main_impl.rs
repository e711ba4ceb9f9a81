//! Pulso Vital HTTP Server
//!
//! Financial calculations API server using Axum.
//!
//! # Endpoints
//!
//! - `GET /`
//!   - Service descriptor (name and version).
//! - `GET /health`
//!   - Liveness probe, always `{"ok": true}`, never authenticated.
//! - `POST /compute`
//!   - Body: `{"datos_crudos": {...}, "flags": {...}}` (`flags` optional).
//!   - Returns the full report: `{"raw": {...}, "formatted": {...}, "notes": [...]}`.
//!
//! # Authentication
//!
//! When `APP_API_KEY` is set in the environment, `/compute` requires the same
//! value in the `X-API-Key` request header and answers 401 otherwise.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pulso_core::compute_financials;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;

/// Shared application state.
///
/// Handlers only need the resolved API key; the report pipeline itself is
/// stateless.
#[derive(Clone)]
struct AppState {
    api_key: Option<Arc<str>>,
}

/// Request body for `/compute`.
#[derive(Deserialize)]
struct ComputeRequest {
    /// Raw intake document (personal/ocupacional/economico/patrimonial/...).
    datos_crudos: Value,
    /// Optional anti-double-count and normalization flags.
    #[serde(default)]
    flags: Value,
}

/// Handler for the service descriptor.
///
/// Route: `GET /`
async fn root() -> Json<Value> {
    Json(json!({
        "service": "Pulso Vital - Financial Calculations Service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for the liveness probe.
///
/// Route: `GET /health`
async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Handler for the report computation.
///
/// Route: `POST /compute`
async fn compute(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ComputeRequest>,
) -> Response {
    if let Some(expected) = &state.api_key {
        let presented = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_ref()) {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Unauthorized" })),
            )
                .into_response();
        }
    }

    let report = compute_financials(&payload.datos_crudos, &payload.flags);
    Json(report).into_response()
}

/// Creates the Axum router with all routes configured.
///
/// This function is separated from `main` to enable integration testing
/// without requiring a live server.
///
/// # Arguments
/// * `api_key` - When set, `/compute` requires a matching `X-API-Key` header.
///
/// # Returns
/// A configured `Router` with all endpoints and shared state.
pub fn create_app(api_key: Option<String>) -> Router {
    let state = AppState {
        api_key: api_key.map(Arc::from),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/compute", post(compute))
        .with_state(state)
}

/// Main server entry point.
///
/// Resolves the runtime configuration from the environment, binds the
/// listener and serves until terminated. A malformed `PORT` aborts startup
/// before any socket exists.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RuntimeConfig::from_env()?;

    info!("Pulso Vital server v{}", env!("CARGO_PKG_VERSION"));
    if config.api_key.is_some() {
        info!("API key authentication enabled");
    }

    let app = create_app(config.api_key.clone());

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.port, e))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
