//! Liveness, readiness and full health endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Round-trips a trivial query, reporting the latency in milliseconds.
/// `None` means the database is unreachable.
async fn probe_database(pool: &PgPool) -> Option<u64> {
    let start = std::time::Instant::now();
    sqlx::query("SELECT 1").execute(pool).await.ok()?;
    Some(start.elapsed().as_millis() as u64)
}

/// Full health check: database connectivity plus service version.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    match probe_database(&state.pool).await {
        Some(latency_ms) => Ok(Json(HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            database: DatabaseHealth {
                connected: true,
                latency_ms: Some(latency_ms),
            },
        })),
        None => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

/// Liveness probe; answers as long as the process runs.
pub async fn live() -> Json<Value> {
    Json(json!({"status": "alive"}))
}

/// Readiness probe; requires a reachable database.
pub async fn ready(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if probe_database(&state.pool).await.is_some() {
        Ok(Json(json!({"status": "ready"})))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
