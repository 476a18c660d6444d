//! `POST /fotograf-analiz`: identify a drug from a package photo.

use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::Json;
use drug_lens_core::render_report;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::types::{AnalysisResponse, AppState};

/// Field name used by the mobile client.
const FILE_FIELD: &str = "file";

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    analyze_upload(state, multipart)
        .await
        .map_err(ApiError::on_photo)
}

async fn analyze_upload(
    state: AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let bytes = read_upload(&mut multipart).await?;

    let result = state.engine.resolve(&bytes).await?;

    Ok(Json(AnalysisResponse {
        analiz: render_report(&result),
    }))
}

/// Bytes of the first field carrying a file.
async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if !is_file_field(&field) {
            debug!(name = ?field.name(), "Skipping non-file multipart field");
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        return Ok(bytes.to_vec());
    }

    Err(ApiError::BadRequest("No file uploaded".into()))
}

fn is_file_field(field: &Field<'_>) -> bool {
    field.file_name().is_some() || field.name() == Some(FILE_FIELD)
}
