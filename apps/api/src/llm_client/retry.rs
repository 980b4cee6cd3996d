//! Bounded retry around a `TextGenerator`.
//!
//! The loop is an explicit state machine so the quota short-circuit can be
//! tested without a network:
//!
//! ```text
//! Attempting(n) --ok--------------------------> Succeeded
//! Attempting(n) --quota-----------------------> QuotaExhausted
//! Attempting(n) --retryable, n < max----------> Attempting(n + 1)
//! Attempting(n) --final error or n == max-----> Exhausted
//! ```
//!
//! Delays are fixed, not exponential.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};

const DEFAULT_MAX_ATTEMPTS: u32 = 2;
const DEFAULT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    /// The n-th attempt (1-based) is about to run.
    Attempting(u32),
    QuotaExhausted,
    Exhausted,
    Succeeded(String),
}

impl RetryState {
    pub fn start() -> Self {
        RetryState::Attempting(1)
    }

    pub fn on_success(self, text: String) -> Self {
        match self {
            RetryState::Attempting(_) => RetryState::Succeeded(text),
            terminal => terminal,
        }
    }

    pub fn on_failure(self, error: &LlmError, policy: &RetryPolicy) -> Self {
        match self {
            RetryState::Attempting(_) if error.is_quota() => RetryState::QuotaExhausted,
            RetryState::Attempting(n) if error.is_retryable() && n < policy.max_attempts => {
                RetryState::Attempting(n + 1)
            }
            RetryState::Attempting(_) => RetryState::Exhausted,
            terminal => terminal,
        }
    }
}

/// What the AI stage produced. Never an error: every failure path is a value
/// the normalizer turns into the fallback analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Fence-stripped model text.
    Completed { text: String, attempts: u32 },
    QuotaExhausted { attempts: u32 },
    Exhausted { attempts: u32, last_error: String },
    /// No credential configured; no call was made.
    Unavailable,
}

/// Runs the retry state machine against `generator` until it reaches a
/// terminal state.
///
/// Only transport and API failures consume attempts. A reply that arrives but
/// is not valid analysis JSON still ends as `Completed`; the normalizer turns
/// it into the fallback without another call.
pub async fn generate_with_retry(
    generator: &dyn TextGenerator,
    prompt: &str,
    system: &str,
    policy: &RetryPolicy,
) -> GenerationOutcome {
    let mut state = RetryState::start();
    let mut attempts = 0;
    let mut last_error = String::new();

    while let RetryState::Attempting(attempt) = state {
        if attempt > 1 {
            tokio::time::sleep(policy.delay).await;
        }
        attempts = attempt;

        state = match generator.generate(prompt, system).await {
            Ok(text) => {
                info!("AI analysis completed on attempt {attempt}/{}", policy.max_attempts);
                state.on_success(strip_json_fences(&text).to_string())
            }
            Err(e) => {
                let next = state.on_failure(&e, policy);
                match &next {
                    RetryState::QuotaExhausted => warn!(
                        "Quota exceeded (attempt {attempt}/{}), skipping remaining retries: {e}",
                        policy.max_attempts
                    ),
                    RetryState::Attempting(_) => warn!(
                        "AI call failed (attempt {attempt}/{}), retrying in {}ms: {e}",
                        policy.max_attempts,
                        policy.delay.as_millis()
                    ),
                    _ => error!(
                        "AI call failed (attempt {attempt}/{}), giving up: {e}",
                        policy.max_attempts
                    ),
                }
                last_error = e.to_string();
                next
            }
        };
    }

    match state {
        RetryState::Succeeded(text) => GenerationOutcome::Completed { text, attempts },
        RetryState::QuotaExhausted => GenerationOutcome::QuotaExhausted { attempts },
        RetryState::Exhausted | RetryState::Attempting(_) => {
            GenerationOutcome::Exhausted {
                attempts,
                last_error,
            }
        }
    }
}
