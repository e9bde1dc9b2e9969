// Client configuration: judge endpoint, poll budget, fan-out bound.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_MAX_IN_FLIGHT: usize = 8;

/// Per-case poll budget. Timeout is expressed as attempts x interval,
/// not as a wall-clock deadline.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

/// Batch execution settings: poll budget plus the in-flight cap that
/// keeps large batches from flooding the remote service.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub poll: PollConfig,
    pub max_in_flight: usize,
}

impl RunConfig {
    pub fn new() -> Self {
        Self {
            poll: PollConfig::default(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to construct a client and run batches.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub run: RunConfig,
}

impl JudgeConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            run: RunConfig::new(),
        }
    }

    /// Load from the environment. `JUDGE_URL` is required; everything
    /// else falls back to the defaults above.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("JUDGE_URL")
            .context("JUDGE_URL is not set; point it at the judge service")?;
        let api_key = std::env::var("JUDGE_API_KEY").ok();

        let max_attempts = env_parse("JUDGE_POLL_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        let interval_ms = env_parse("JUDGE_POLL_INTERVAL_MS", DEFAULT_INTERVAL_MS)?;
        let max_in_flight = env_parse("JUDGE_MAX_IN_FLIGHT", DEFAULT_MAX_IN_FLIGHT)?;

        Ok(Self {
            base_url,
            api_key,
            run: RunConfig {
                poll: PollConfig {
                    max_attempts,
                    interval: Duration::from_millis(interval_ms),
                },
                max_in_flight,
            },
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} must be numeric, got \"{}\"", key, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_defaults() {
        let poll = PollConfig::default();
        assert_eq!(poll.max_attempts, 30);
        assert_eq!(poll.interval, Duration::from_millis(1_000));
    }

    #[test]
    fn test_run_config_bounds_fan_out() {
        assert_eq!(RunConfig::new().max_in_flight, DEFAULT_MAX_IN_FLIGHT);
    }

    #[test]
    fn test_judge_config_builder() {
        let config = JudgeConfig::new("http://judge.internal:2358/");
        assert_eq!(config.base_url, "http://judge.internal:2358/");
        assert!(config.api_key.is_none());
        assert_eq!(config.run.poll.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }
}
