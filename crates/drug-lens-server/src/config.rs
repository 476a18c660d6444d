//! Server configuration: command-line flags with environment fallbacks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use drug_lens_core::reference::DEFAULT_SIMILARITY_THRESHOLD;
use drug_lens_core::{SimilarityMatcher, SubstringMatcher, TrustedReference};
use drug_lens_llm::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use drug_lens_llm::{GeminiConfig, RetryPolicy, SleepPolicy};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,drug_lens=debug";

/// Default upload cap for `/fotograf-analiz` (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Name matching strategy for reference lookup.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatcherKind {
    /// Key must appear verbatim in the detected name
    #[default]
    Substring,
    /// Containment, or a detected token scoring above the threshold
    Similarity,
}

/// Drug Lens HTTP server
#[derive(Parser, Debug, Clone)]
#[command(name = "drug-lens")]
#[command(version)]
#[command(about = "Answer drug questions and identify drugs from package photos")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "DRUG_LENS_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Gemini API key
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(long, env = "DRUG_LENS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Model API base URL
    #[arg(long, env = "DRUG_LENS_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// Transport timeout for a single model request, in seconds
    #[arg(long, env = "DRUG_LENS_REQUEST_TIMEOUT_SECS", default_value_t = 120)]
    pub request_timeout_secs: u64,

    /// Attempts per model call before giving up on rate limits
    #[arg(long, env = "DRUG_LENS_MAX_ATTEMPTS", default_value_t = 3)]
    pub max_attempts: u32,

    /// First backoff wait after a rate limit, in seconds; doubles each retry
    #[arg(long, env = "DRUG_LENS_INITIAL_BACKOFF_SECS", default_value_t = 10)]
    pub initial_backoff_secs: u64,

    /// How backoff waits run: `cooperative` or `worker-thread`
    #[arg(long, env = "DRUG_LENS_SLEEP_POLICY", default_value = "cooperative")]
    pub sleep_policy: SleepPolicy,

    /// JSON file with drug records replacing the built-in reference
    #[arg(long, env = "DRUG_LENS_REFERENCE")]
    pub reference: Option<PathBuf>,

    /// How detected names are matched against reference keys
    #[arg(long, env = "DRUG_LENS_MATCHER", value_enum, default_value_t = MatcherKind::Substring)]
    pub matcher: MatcherKind,

    /// Score in 0..=1 a token needs under the similarity matcher
    #[arg(long, env = "DRUG_LENS_SIMILARITY_THRESHOLD", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub similarity_threshold: f64,

    /// Maximum request body size for photo uploads
    #[arg(long, env = "DRUG_LENS_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_secs(self.initial_backoff_secs),
        )
    }

    /// Load the trusted reference (the configured file, or the built-in set)
    /// with the configured matcher.
    pub fn load_reference(&self) -> anyhow::Result<TrustedReference> {
        let reference = match &self.reference {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read reference file {}", path.display()))?;
                TrustedReference::from_json(&json)
                    .with_context(|| format!("Invalid reference file {}", path.display()))?
            }
            None => TrustedReference::builtin(),
        };

        Ok(match self.matcher {
            MatcherKind::Substring => reference.with_matcher(SubstringMatcher),
            MatcherKind::Similarity => {
                reference.with_matcher(SimilarityMatcher::new(self.similarity_threshold))
            }
        })
    }
}
