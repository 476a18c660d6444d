//! Drug name extraction from package photos.

use std::sync::Arc;

use drug_lens_core::normalize_name;
use tracing::debug;

use crate::invoker::{InvokeError, ModelInvoker};
use crate::model::PromptPart;
use crate::photo::DecodedImage;
use crate::prompts::NAME_EXTRACTION_PROMPT;

/// Asks the model to read the brand name printed on a package.
pub struct NameExtractor {
    invoker: Arc<ModelInvoker>,
}

impl NameExtractor {
    pub fn new(invoker: Arc<ModelInvoker>) -> Self {
        Self { invoker }
    }

    /// Extract the most prominent brand name, lower-cased and trimmed.
    ///
    /// The output is not validated: an empty string or a whole sentence comes
    /// back unchanged apart from normalization.
    pub async fn extract_name(&self, image: &DecodedImage) -> Result<String, InvokeError> {
        let parts = [
            PromptPart::text(NAME_EXTRACTION_PROMPT),
            PromptPart::image(image),
        ];

        let raw = self.invoker.invoke(&parts).await?;
        debug!(raw = %raw, "Name extraction response");

        Ok(normalize_name(&raw))
    }
}
