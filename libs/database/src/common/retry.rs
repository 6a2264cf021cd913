use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff schedule for start-up connection attempts.
///
/// Retry `n` (1-based) waits `initial_delay * multiplier^(n-1)`, capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Shrink each wait by a random factor in [0.5, 1.0)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Wait before retry `attempt` (1-based), jitter not applied
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        Duration::try_from_secs_f64(secs)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    fn wait_for(&self, attempt: u32) -> Duration {
        let delay = self.delay_for(attempt);
        if self.jitter { jittered(delay) } else { delay }
    }
}

#[cfg(feature = "config")]
impl core_config::FromEnv for RetryConfig {
    /// `DB_CONNECT_RETRIES` (default 5) and `DB_CONNECT_RETRY_DELAY_MS` (default 200)
    fn from_env() -> Result<Self, core_config::ConfigError> {
        let max_retries = core_config::env_parse("DB_CONNECT_RETRIES", "5")?;
        let initial_ms: u64 = core_config::env_parse("DB_CONNECT_RETRY_DELAY_MS", "200")?;
        Ok(Self::default()
            .with_max_retries(max_retries)
            .with_initial_delay(Duration::from_millis(initial_ms)))
    }
}

/// Await `operation` until it succeeds or `config.max_retries` retries are spent.
///
/// The final error is returned as produced by `operation`.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    for attempt in 1..=config.max_retries {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(e) => {
                let wait = config.wait_for(attempt);
                debug!(attempt, max_retries = config.max_retries, wait = ?wait, error = %e, "Attempt failed, retrying");
                tokio::time::sleep(wait).await;
            }
        }
    }

    operation().await.inspect_err(|e| {
        warn!(attempts = config.max_retries + 1, error = %e, "Giving up");
    })
}

/// [`retry_with_backoff`] with [`RetryConfig::default`].
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

fn jittered(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    let percent = RandomState::new().hash_one(std::time::Instant::now()) % 50 + 50;
    delay.mul_f64(percent as f64 / 100.0)
}
