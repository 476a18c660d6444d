//! Shared state and wire types.

use std::sync::Arc;

use drug_lens_core::TrustedReference;
use drug_lens_llm::{ModelInvoker, QuestionAnswerer, ResolutionEngine};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ResolutionEngine>,
    pub answerer: Arc<QuestionAnswerer>,
    /// Whether a model API key was supplied at startup
    pub model_configured: bool,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Wire both pipelines to one invoker.
    pub fn new(
        reference: Arc<TrustedReference>,
        invoker: Arc<ModelInvoker>,
        model_configured: bool,
    ) -> Self {
        Self {
            engine: Arc::new(ResolutionEngine::new(reference, invoker.clone())),
            answerer: Arc::new(QuestionAnswerer::new(invoker)),
            model_configured,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

/// `POST /ilac-sor` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskRequest {
    /// Drug name as typed by the user
    pub ilac_adi: String,
    /// Free-text question
    pub soru: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub cevap: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Rendered report, verified or unverified
    pub analiz: String,
}

/// Error envelope returned with HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub hata: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model_configured: bool,
}
