//! Resolution engine: photo → verified record or unverified AI summary.
//!
//! Pipeline: Decode → Name Extraction → Reference lookup → (miss) General-knowledge prompt
//!
//! Model calls are strictly sequential: one for extraction, plus one more
//! only when the reference has no match.

use std::sync::Arc;

use drug_lens_core::{normalize_name, ResolutionResult, TrustedReference};
use thiserror::Error;
use tracing::info;

use crate::extraction::NameExtractor;
use crate::invoker::{InvokeError, ModelInvoker};
use crate::model::PromptPart;
use crate::photo::{decode_image, DecodeError};
use crate::prompts::make_general_knowledge_prompt;

/// Resolution errors.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),
}

pub type ResolveResult<T> = Result<T, ResolutionError>;

/// Identifies drugs from package photos.
pub struct ResolutionEngine {
    reference: Arc<TrustedReference>,
    invoker: Arc<ModelInvoker>,
    extractor: NameExtractor,
}

impl ResolutionEngine {
    pub fn new(reference: Arc<TrustedReference>, invoker: Arc<ModelInvoker>) -> Self {
        Self {
            extractor: NameExtractor::new(invoker.clone()),
            reference,
            invoker,
        }
    }

    /// Resolve an uploaded photo.
    pub async fn resolve(&self, image_bytes: &[u8]) -> ResolveResult<ResolutionResult> {
        let image = decode_image(image_bytes)?;
        info!(
            digest = %image.digest(),
            mime_type = image.mime_type,
            width = image.width,
            height = image.height,
            "Processing photo"
        );

        let detected_name = self.extractor.extract_name(&image).await?;
        info!(detected_name = %detected_name, "Detected name");

        self.resolve_name(&detected_name).await
    }

    /// Resolve a detected name against the reference, falling back to the
    /// model's general knowledge on a miss. The name is normalized first.
    pub async fn resolve_name(&self, detected_name: &str) -> ResolveResult<ResolutionResult> {
        let detected_name = normalize_name(detected_name);

        let result = match self.reference.lookup(&detected_name) {
            Some(record) => {
                info!(key = %record.key, "Verified database match");
                ResolutionResult::Verified {
                    record: record.clone(),
                }
            }
            None => {
                info!(detected_name = %detected_name, "Database miss, asking general knowledge");
                let prompt = make_general_knowledge_prompt(&detected_name);
                let ai_summary = self.invoker.invoke(&[PromptPart::text(prompt)]).await?;
                ResolutionResult::Unverified {
                    detected_name,
                    ai_summary,
                }
            }
        };

        info!(tier = ?result.tier(), "Resolution complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drug_lens_core::TrustTier;

    use crate::mock::{sample_png, RecordingSleeper, ScriptedModel};
    use crate::model::ModelError;

    fn engine(model: &Arc<ScriptedModel>) -> ResolutionEngine {
        let invoker = ModelInvoker::new(model.clone())
            .with_sleeper(Arc::new(RecordingSleeper::default()));
        ResolutionEngine::new(Arc::new(TrustedReference::builtin()), Arc::new(invoker))
    }

    #[tokio::test]
    async fn test_verified_uses_single_call() {
        let model = Arc::new(ScriptedModel::always("should not be used").then_ok("Parol 500mg"));

        let result = engine(&model)
            .resolve(&sample_png(4, 4).unwrap())
            .await
            .unwrap();

        let record = result.record().unwrap();
        assert_eq!(record.full_name, "Parol 500 mg Tablet");
        assert_eq!(record.active_ingredient, "Paracetamol");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unverified_uses_two_calls() {
        let model = Arc::new(
            ScriptedModel::new()
                .then_ok("Ibuprofen XR")
                .then_ok("Name: Ibuprofen XR\n💊 Usage: Pain\n⚠️ Warning: Stomach"),
        );

        let result = engine(&model)
            .resolve(&sample_png(4, 4).unwrap())
            .await
            .unwrap();

        match result {
            ResolutionResult::Unverified {
                detected_name,
                ai_summary,
            } => {
                assert_eq!(detected_name, "ibuprofen xr");
                assert!(!ai_summary.is_empty());
                assert!(ai_summary.starts_with("Name: Ibuprofen XR"));
            }
            other => panic!("expected unverified, got {:?}", other),
        }

        let calls = model.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1][0].as_text().unwrap().contains("'ibuprofen xr'"));
        assert!(calls[1].iter().all(|p| !p.is_image()));
    }

    #[tokio::test]
    async fn test_decode_failure_makes_no_calls() {
        let model = Arc::new(ScriptedModel::always("Parol"));

        let err = engine(&model).resolve(b"not an image").await.unwrap_err();

        assert!(matches!(err, ResolutionError::Decode(_)));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_extraction_failure_propagates() {
        let model = Arc::new(ScriptedModel::new().then_err(ModelError::MissingApiKey));

        let err = engine(&model)
            .resolve(&sample_png(4, 4).unwrap())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolutionError::Invoke(InvokeError::Model(ModelError::MissingApiKey))
        ));
    }

    #[tokio::test]
    async fn test_fallback_server_busy() {
        let model = Arc::new(
            ScriptedModel::new()
                .then_ok("unknown brand")
                .then_rate_limited()
                .then_rate_limited()
                .then_rate_limited(),
        );

        let err = engine(&model)
            .resolve(&sample_png(4, 4).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Server busy.");
        assert_eq!(model.call_count(), 4);
    }

    #[tokio::test]
    async fn test_empty_name_goes_unverified() {
        let model = Arc::new(ScriptedModel::new().then_ok("   ").then_ok("summary"));

        let result = engine(&model)
            .resolve(&sample_png(4, 4).unwrap())
            .await
            .unwrap();

        assert_eq!(
            result,
            ResolutionResult::Unverified {
                detected_name: String::new(),
                ai_summary: "summary".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_resolve_name_normalizes_raw_input() {
        let model = Arc::new(ScriptedModel::new().then_ok("summary"));
        let engine = engine(&model);

        let verified = engine.resolve_name("  PAROL Forte ").await.unwrap();
        assert_eq!(verified.tier(), TrustTier::Verified);
        assert_eq!(model.call_count(), 0);

        let unverified = engine.resolve_name("  Ibuprofen XR\n").await.unwrap();
        assert_eq!(unverified.tier(), TrustTier::Unverified);
        assert_eq!(
            unverified,
            ResolutionResult::Unverified {
                detected_name: "ibuprofen xr".into(),
                ai_summary: "summary".into(),
            }
        );
        assert!(model.calls()[0][0].as_text().unwrap().contains("'ibuprofen xr'"));
    }
}
