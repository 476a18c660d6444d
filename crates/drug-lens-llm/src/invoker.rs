//! Resilient model invoker.
//!
//! Wraps every model call in bounded retry with exponential backoff. Only
//! rate-limit rejections are retried; every other failure is returned after
//! the first attempt.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::model::{GenerativeModel, ModelError, PromptPart};

/// Default number of model calls per invocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default wait after the first rate-limited attempt.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(10);

/// Invocation errors.
#[derive(Error, Debug)]
pub enum InvokeError {
    /// Every attempt was rate limited.
    #[error("Server busy.")]
    ServerBusy { attempts: u32 },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Retry schedule for rate-limited calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total model calls allowed, including the first
    pub max_attempts: u32,
    /// Wait after the first rate-limited attempt
    pub initial_delay: Duration,
    /// Factor applied to the wait after each rate-limited attempt
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Exponential doubling policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            multiplier: 2,
        }
    }

    /// Wait after the given zero-based rate-limited attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(attempt);
        self.initial_delay.saturating_mul(factor)
    }

    /// Every wait the policy can produce, in order (10s, 20s, 40s by default).
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_attempts).map(|a| self.delay_for(a)).collect()
    }

    /// Worst-case time spent waiting before giving up.
    pub fn worst_case_wait(&self) -> Duration {
        self.schedule()
            .into_iter()
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(d))
    }
}

/// Suspension point used between attempts.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Yields to the tokio runtime while waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooperativeSleeper;

#[async_trait]
impl Sleeper for CooperativeSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Blocks a thread from tokio's blocking pool; the calling task awaits it.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerThreadSleeper;

#[async_trait]
impl Sleeper for WorkerThreadSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Err(e) = tokio::task::spawn_blocking(move || std::thread::sleep(duration)).await {
            warn!(error = %e, "Backoff worker thread failed");
        }
    }
}

/// How backoff waits are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SleepPolicy {
    #[default]
    Cooperative,
    WorkerThread,
}

impl SleepPolicy {
    pub fn sleeper(self) -> Arc<dyn Sleeper> {
        match self {
            SleepPolicy::Cooperative => Arc::new(CooperativeSleeper),
            SleepPolicy::WorkerThread => Arc::new(WorkerThreadSleeper),
        }
    }
}

impl fmt::Display for SleepPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepPolicy::Cooperative => write!(f, "cooperative"),
            SleepPolicy::WorkerThread => write!(f, "worker-thread"),
        }
    }
}

impl FromStr for SleepPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cooperative" => Ok(SleepPolicy::Cooperative),
            "worker-thread" | "worker_thread" | "blocking" => Ok(SleepPolicy::WorkerThread),
            other => Err(format!(
                "unknown sleep policy '{other}' (expected 'cooperative' or 'worker-thread')"
            )),
        }
    }
}

/// Calls a [`GenerativeModel`] under a [`RetryPolicy`].
pub struct ModelInvoker {
    model: Arc<dyn GenerativeModel>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl ModelInvoker {
    /// Invoker with the default policy and cooperative sleeping.
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            model,
            policy: RetryPolicy::default(),
            sleeper: Arc::new(CooperativeSleeper),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Call the model, backing off on rate limits.
    pub async fn invoke(&self, parts: &[PromptPart]) -> Result<String, InvokeError> {
        let max_attempts = self.policy.max_attempts;
        let mut delay = self.policy.initial_delay;

        for attempt in 1..=max_attempts {
            match self.model.generate(parts).await {
                Ok(text) => {
                    if attempt > 1 {
                        debug!(attempt, model = self.model.name(), "Model call succeeded after backoff");
                    }
                    return Ok(text);
                }
                Err(e) if e.is_rate_limited() => {
                    warn!(
                        attempt,
                        max_attempts,
                        wait_secs = delay.as_secs_f64(),
                        error = %e,
                        "Quota exceeded, backing off"
                    );
                    self.sleeper.sleep(delay).await;
                    delay = delay.saturating_mul(self.policy.multiplier);
                }
                Err(e) => return Err(InvokeError::Model(e)),
            }
        }

        error!(attempts = max_attempts, model = self.model.name(), "Model still rate limited, giving up");
        Err(InvokeError::ServerBusy {
            attempts: max_attempts,
        })
    }
}
