//! Free-text questions about a named drug.
//!
//! This path never consults the trusted reference, so answers carry no
//! trust tier.

use std::sync::Arc;

use tracing::info;

use crate::invoker::{InvokeError, ModelInvoker};
use crate::model::PromptPart;
use crate::prompts::make_pharmacist_prompt;

/// Answers questions with a single pharmacist-role prompt.
pub struct QuestionAnswerer {
    invoker: Arc<ModelInvoker>,
}

impl QuestionAnswerer {
    pub fn new(invoker: Arc<ModelInvoker>) -> Self {
        Self { invoker }
    }

    pub async fn answer(&self, drug_name: &str, question: &str) -> Result<String, InvokeError> {
        info!(drug_name = %drug_name, "Answering drug question");
        let prompt = make_pharmacist_prompt(drug_name, question);
        self.invoker.invoke(&[PromptPart::text(prompt)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingSleeper, ScriptedModel};
    use crate::model::ModelError;

    fn answerer(model: &Arc<ScriptedModel>) -> QuestionAnswerer {
        let invoker = ModelInvoker::new(model.clone())
            .with_sleeper(Arc::new(RecordingSleeper::default()));
        QuestionAnswerer::new(Arc::new(invoker))
    }

    #[tokio::test]
    async fn test_answer() {
        let model = Arc::new(ScriptedModel::always("Yes, taking it with food reduces stomach upset."));

        let answer = answerer(&model)
            .answer("Aspirin", "Can I take this with food?")
            .await
            .unwrap();

        assert!(!answer.is_empty());
        assert_eq!(model.call_count(), 1);
        assert_eq!(
            model.calls()[0][0].as_text(),
            Some("Drug: Aspirin. Question: Can I take this with food?. Answer briefly as a pharmacist.")
        );
    }

    #[tokio::test]
    async fn test_unknown_drug_still_answered() {
        // No reference check on this path
        let model = Arc::new(ScriptedModel::always("I am not familiar with that product."));

        let answer = answerer(&model).answer("Zzyzx", "Dose?").await.unwrap();

        assert_eq!(answer, "I am not familiar with that product.");
    }

    #[tokio::test]
    async fn test_answer_error_propagates() {
        let model = Arc::new(ScriptedModel::new().then_err(ModelError::Http("timeout".into())));

        let err = answerer(&model).answer("Aspirin", "?").await.unwrap_err();

        assert!(matches!(err, InvokeError::Model(ModelError::Http(_))));
    }
}
