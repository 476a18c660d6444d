//! Router assembly.

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::AppState;

/// Build the application router.
///
/// Each request gets a span carrying a random `request_id` so the retry
/// warnings of one slow request can be told apart from another's.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/ilac-sor", post(endpoints::ask::ask))
        .route("/fotograf-analiz", post(endpoints::photo::analyze))
        .route("/health", get(endpoints::health::check))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %uuid::Uuid::new_v4(),
                )
            }),
        )
        .with_state(state)
}
