//! Test doubles for running the pipeline without a real model.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::invoker::Sleeper;
use crate::model::{GenerativeModel, ModelError, ModelResult, PromptPart};

/// Model that replays a fixed script of responses and records every call.
///
/// Once the script runs out it returns the fallback text if one was set,
/// otherwise an [`ModelError::EmptyResponse`].
#[derive(Default)]
pub struct ScriptedModel {
    script: Mutex<VecDeque<ModelResult<String>>>,
    fallback: Option<String>,
    calls: Mutex<Vec<Vec<PromptPart>>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model that always answers with `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallback: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn then_ok(self, text: impl Into<String>) -> Self {
        self.then(Ok(text.into()))
    }

    pub fn then_err(self, error: ModelError) -> Self {
        self.then(Err(error))
    }

    pub fn then_rate_limited(self) -> Self {
        self.then_err(ModelError::rate_limited(
            "Resource has been exhausted (e.g. check quota).",
        ))
    }

    fn then(self, response: ModelResult<String>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Prompt parts of every call so far, in order.
    pub fn calls(&self) -> Vec<Vec<PromptPart>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, parts: &[PromptPart]) -> ModelResult<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(parts.to_vec());

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match (next, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => Err(ModelError::EmptyResponse("script exhausted".into())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Sleeper that records requested waits and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        self.waits.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(duration);
    }
}

/// Encode a solid-colour PNG of the given size.
pub fn sample_png(width: u32, height: u32) -> image::ImageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image::DynamicImage::new_rgb8(width, height)
        .write_to(&mut bytes, image::ImageOutputFormat::Png)?;
    Ok(bytes)
}
