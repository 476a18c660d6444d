//! `POST /ilac-sor`: free-text question about a named drug.
//!
//! The answer comes straight from the model; the trusted reference is not
//! consulted on this route.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AppState, AskRequest, AskResponse};

pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let cevap = state
        .answerer
        .answer(&request.ilac_adi, &request.soru)
        .await?;

    Ok(Json(AskResponse { cevap }))
}
