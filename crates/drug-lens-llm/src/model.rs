//! Generative model capability.
//!
//! The rest of the crate only needs one thing from a model: given text and
//! image parts, return text.

use async_trait::async_trait;
use thiserror::Error;

use crate::photo::DecodedImage;

/// HTTP status the model API uses for quota / rate-limit rejections.
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Model call errors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model API key is not configured (set GOOGLE_API_KEY)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("{status} {body}")]
    Api { status: u16, body: String },

    #[error("Response parse error: {0}")]
    ResponseParsing(String),

    #[error("Model returned no text: {0}")]
    EmptyResponse(String),
}

impl ModelError {
    /// Build the error the API returns when quota is exceeded.
    pub fn rate_limited(body: impl Into<String>) -> Self {
        ModelError::Api {
            status: RATE_LIMIT_STATUS,
            body: body.into(),
        }
    }

    /// Whether this failure is a transient quota rejection worth retrying.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ModelError::Api { status, body } => {
                *status == RATE_LIMIT_STATUS || body.contains("RESOURCE_EXHAUSTED")
            }
            _ => false,
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Image { mime_type: String, data: Vec<u8> },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        PromptPart::Text(text.into())
    }

    pub fn image(image: &DecodedImage) -> Self {
        PromptPart::Image {
            mime_type: image.mime_type.to_string(),
            data: image.bytes.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PromptPart::Text(text) => Some(text),
            PromptPart::Image { .. } => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, PromptPart::Image { .. })
    }
}

/// A text-generating model that accepts text and image input.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, parts: &[PromptPart]) -> ModelResult<String>;

    /// Model identifier for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_classification() {
        assert!(ModelError::rate_limited("quota").is_rate_limited());
        assert!(ModelError::Api {
            status: 503,
            body: r#"{"error":{"status":"RESOURCE_EXHAUSTED"}}"#.into()
        }
        .is_rate_limited());

        assert!(!ModelError::Api {
            status: 400,
            body: "API key not valid".into()
        }
        .is_rate_limited());
        assert!(!ModelError::MissingApiKey.is_rate_limited());
        assert!(!ModelError::Http("connection refused".into()).is_rate_limited());
    }

    #[test]
    fn test_rate_limit_message_carries_status() {
        let message = ModelError::rate_limited("Resource has been exhausted").to_string();
        assert!(message.contains("429"));
    }

    #[test]
    fn test_prompt_part_accessors() {
        let text = PromptPart::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(!text.is_image());

        let image = PromptPart::Image {
            mime_type: "image/png".into(),
            data: vec![1, 2, 3],
        };
        assert!(image.as_text().is_none());
        assert!(image.is_image());
    }
}
