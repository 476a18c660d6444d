//! API errors rendered as `{ "hata": message }`.
//!
//! Clients read the envelope, not the status line, so every handled failure
//! answers HTTP 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use drug_lens_llm::{InvokeError, ResolutionError};
use thiserror::Error;

use crate::api::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Failure on the photo route, reported with an `Error: ` prefix.
    #[error("Error: {0}")]
    Photo(Box<ApiError>),
}

impl ApiError {
    pub fn on_photo(self) -> Self {
        if matches!(self, ApiError::Photo(_)) {
            self
        } else {
            ApiError::Photo(Box::new(self))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hata = self.to_string();
        tracing::warn!(error = %hata, "Request failed");

        (StatusCode::OK, Json(ErrorBody { hata })).into_response()
    }
}
