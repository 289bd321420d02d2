use super::call_window::CallWindow;
use super::rate_limiter::DEFAULT_KEY;
use crate::domain::RateLimitConfig;
use dashmap::DashMap;
use safe_csrf_errors::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// [`RateLimiter`](super::RateLimiter) semantics behind `&self`, shareable
/// across threads. Clones share the same history.
///
/// The check-and-record for a key runs under that key's map guard, so
/// concurrent callers on one key are never admitted past `max_calls`.
#[derive(Debug, Clone)]
pub struct SharedRateLimiter {
    max_calls: u32,
    period: Duration,
    calls: Arc<DashMap<String, CallWindow>>,
}

impl SharedRateLimiter {
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self {
            max_calls,
            period,
            calls: Arc::new(DashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self::new(config.max_calls, config.period()?))
    }

    pub fn max_calls(&self) -> u32 {
        self.max_calls
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn allow(&self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    pub fn allow_default(&self) -> bool {
        self.allow(DEFAULT_KEY)
    }

    pub fn allow_at(&self, key: &str, now: Instant) -> bool {
        let allowed = match self.calls.get_mut(key) {
            Some(mut window) => window.try_admit(now, self.max_calls, self.period),
            None => self
                .calls
                .entry(key.to_owned())
                .or_default()
                .try_admit(now, self.max_calls, self.period),
        };

        if !allowed {
            tracing::debug!(key, max_calls = self.max_calls, "Rate limit exceeded");
        }

        allowed
    }

    pub fn reset(&self, key: &str) {
        if self.calls.remove(key).is_some() {
            tracing::debug!(key, "Rate limit history cleared");
        }
    }

    pub fn reset_default(&self) {
        self.reset(DEFAULT_KEY);
    }
}

impl Default for SharedRateLimiter {
    fn default() -> Self {
        let config = RateLimitConfig::default();
        Self::new(
            config.max_calls,
            Duration::from_secs_f64(config.period_secs),
        )
    }
}
