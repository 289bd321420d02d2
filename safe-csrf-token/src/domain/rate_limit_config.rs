use safe_csrf_errors::AppError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_CALLS: u32 = 10;
pub const DEFAULT_PERIOD_SECS: f64 = 60.0;

const MAX_CALLS_ENV: &str = "SAFE_CSRF_MAX_CALLS";
const PERIOD_SECS_ENV: &str = "SAFE_CSRF_PERIOD_SECS";

/// How many calls a single key may make inside a rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_calls: u32,
    pub period_secs: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_MAX_CALLS,
            period_secs: DEFAULT_PERIOD_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self::default().with_max_calls(max_calls).with_period(period)
    }

    pub fn with_max_calls(mut self, max_calls: u32) -> Self {
        self.max_calls = max_calls;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period_secs = period.as_secs_f64();
        self
    }

    /// Reads `SAFE_CSRF_MAX_CALLS` and `SAFE_CSRF_PERIOD_SECS`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_CALLS_ENV) {
            config.max_calls = raw.trim().parse().map_err(|_| {
                AppError::InvalidConfig(format!("{MAX_CALLS_ENV} is not an integer: {raw}"))
            })?;
        }

        if let Some(raw) = lookup(PERIOD_SECS_ENV) {
            config.period_secs = raw.trim().parse().map_err(|_| {
                AppError::InvalidConfig(format!("{PERIOD_SECS_ENV} is not a number: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.max_calls == 0 {
            return Err(AppError::InvalidConfig(
                "max_calls must be positive".to_string(),
            ));
        }

        self.period().map(|_| ())
    }

    /// The window length, rejecting zero, negative and non-finite values.
    pub fn period(&self) -> Result<Duration, AppError> {
        match Duration::try_from_secs_f64(self.period_secs) {
            Ok(period) if !period.is_zero() => Ok(period),
            _ => Err(AppError::InvalidConfig(format!(
                "period must be a positive number of seconds, got {}",
                self.period_secs
            ))),
        }
    }
}
