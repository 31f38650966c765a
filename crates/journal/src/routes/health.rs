use axum::{extract::State, http::StatusCode};
use log::error;
use std::sync::Arc;

use crate::AppState;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = OK, description = "Database reachable and intact"),
        (status = SERVICE_UNAVAILABLE, description = "Database check failed")
    ))]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            error!("health check failed: {:#}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}
