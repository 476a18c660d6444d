use axum::extract::State;
use axum::Json;

use crate::api::types::{AppState, HealthResponse};

/// `GET /health`
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_configured: state.model_configured,
    })
}
