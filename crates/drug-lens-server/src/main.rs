//! Drug Lens server binary.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use drug_lens_llm::{GeminiClient, ModelInvoker};
use drug_lens_server::config::DEFAULT_LOG_FILTER;
use drug_lens_server::{build_router, AppState, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("Drug Lens starting v{}", env!("CARGO_PKG_VERSION"));

    let gemini = config.gemini_config();
    let model_configured = gemini.has_api_key();
    if !model_configured {
        error!("GOOGLE_API_KEY is not set; model calls will fail until it is configured");
    }

    let reference = Arc::new(config.load_reference()?);
    info!(
        records = reference.len(),
        source = ?config.reference,
        matcher = ?config.matcher,
        "Trusted reference loaded"
    );

    let model = Arc::new(GeminiClient::new(gemini).context("Failed to build model client")?);
    let invoker = ModelInvoker::new(model)
        .with_policy(config.retry_policy())
        .with_sleeper(config.sleep_policy.sleeper());
    info!(
        model = invoker.model_name(),
        max_attempts = invoker.policy().max_attempts,
        sleep_policy = %config.sleep_policy,
        "Model invoker ready"
    );

    let state = AppState::new(reference, Arc::new(invoker), model_configured)
        .with_max_upload_bytes(config.max_upload_bytes);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(bind = %config.bind, "Listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
