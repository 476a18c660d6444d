//! Generative model integration for drug identification.
//!
//! This crate talks to a vision-capable model (Gemini by default), wraps
//! every call in rate-limit aware retry, and runs the photo resolution and
//! question answering steps on top of the trusted reference from
//! `drug-lens-core`.

pub mod answer;
pub mod extraction;
pub mod gemini;
pub mod invoker;
pub mod mock;
pub mod model;
pub mod photo;
pub mod prompts;
pub mod resolution;

pub use answer::QuestionAnswerer;
pub use extraction::NameExtractor;
pub use gemini::{GeminiClient, GeminiConfig};
pub use invoker::{
    CooperativeSleeper, InvokeError, ModelInvoker, RetryPolicy, SleepPolicy, Sleeper,
    WorkerThreadSleeper,
};
pub use model::{GenerativeModel, ModelError, PromptPart};
pub use photo::{decode_image, DecodeError, DecodedImage};
pub use prompts::*;
pub use resolution::{ResolutionEngine, ResolutionError};
