// src/handlers/health.rs

use axum::{extract::State, http::StatusCode};

use crate::config::AppState;

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Server is up", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}

// GET /api/health/ready
#[utoipa::path(
    get,
    path = "/api/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn readiness(State(app_state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(&app_state.db_pool).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
