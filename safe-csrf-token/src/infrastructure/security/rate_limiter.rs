use super::call_window::CallWindow;
use crate::domain::RateLimitConfig;
use safe_csrf_errors::AppError;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_KEY: &str = "default";

/// Sliding-window limiter admitting up to `max_calls` per `period` for each key.
///
/// History is pruned only when its key is queried again, so a key that is
/// never seen again keeps its timestamps until [`RateLimiter::reset`].
#[derive(Debug, Clone)]
pub struct RateLimiter {
    max_calls: u32,
    period: Duration,
    calls: HashMap<String, CallWindow>,
}

impl RateLimiter {
    /// Expects a positive `max_calls` and a non-zero `period`; use
    /// [`RateLimiter::try_new`] for values that come from outside.
    pub fn new(max_calls: u32, period: Duration) -> Self {
        Self {
            max_calls,
            period,
            calls: HashMap::new(),
        }
    }

    pub fn try_new(max_calls: u32, period: Duration) -> Result<Self, AppError> {
        Self::from_config(&RateLimitConfig::new(max_calls, period))
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

    pub fn allow(&mut self, key: &str) -> bool {
        self.allow_at(key, Instant::now())
    }

    pub fn allow_default(&mut self) -> bool {
        self.allow(DEFAULT_KEY)
    }

    /// Same as [`RateLimiter::allow`], measured against `now` instead of the clock.
    pub fn allow_at(&mut self, key: &str, now: Instant) -> bool {
        let (max_calls, period) = (self.max_calls, self.period);

        let allowed = match self.calls.get_mut(key) {
            Some(window) => window.try_admit(now, max_calls, period),
            None => {
                let mut window = CallWindow::default();
                let allowed = window.try_admit(now, max_calls, period);
                self.calls.insert(key.to_owned(), window);
                allowed
            }
        };

        if !allowed {
            tracing::debug!(key, max_calls, period_secs = period.as_secs_f64(), "Rate limit exceeded");
        }

        allowed
    }

    pub fn reset(&mut self, key: &str) {
        if self.calls.remove(key).is_some() {
            tracing::debug!(key, "Rate limit history cleared");
        }
    }

    pub fn reset_default(&mut self) {
        self.reset(DEFAULT_KEY);
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        let config = RateLimitConfig::default();
        Self::new(
            config.max_calls,
            Duration::from_secs_f64(config.period_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_calls: u32) -> RateLimiter {
        RateLimiter::new(max_calls, Duration::from_secs(60))
    }

    #[test]
    fn test_denies_after_max_calls_and_reset_restores() {
        let mut limiter = limiter(2);

        assert!(limiter.allow("k"));
        assert!(limiter.allow("k"));
        assert!(!limiter.allow("k"));

        limiter.reset("k");
        assert!(limiter.allow("k"));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut limiter = limiter(1);

        assert!(limiter.allow("a"));
        assert!(!limiter.allow("a"));
        assert!(limiter.allow("b"));
    }

    #[test]
    fn test_default_key() {
        let mut limiter = limiter(1);

        assert!(limiter.allow_default());
        assert!(!limiter.allow(DEFAULT_KEY));

        limiter.reset_default();
        assert!(limiter.allow_default());
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = limiter(2);
        let start = Instant::now();

        assert!(limiter.allow_at("k", start));
        assert!(limiter.allow_at("k", start + Duration::from_secs(30)));
        assert!(!limiter.allow_at("k", start + Duration::from_secs(59)));

        // the first call has aged out, the second has not
        assert!(limiter.allow_at("k", start + Duration::from_secs(60)));
        assert!(!limiter.allow_at("k", start + Duration::from_secs(61)));
    }

    #[test]
    fn test_denied_call_is_not_recorded() {
        let mut limiter = limiter(1);
        let start = Instant::now();

        assert!(limiter.allow_at("k", start));
        assert!(!limiter.allow_at("k", start + Duration::from_secs(45)));
        assert_eq!(limiter.calls["k"].len(), 1);

        assert!(limiter.allow_at("k", start + Duration::from_secs(60)));
    }

    #[test]
    fn test_history_never_exceeds_max_calls() {
        let mut limiter = limiter(3);
        let start = Instant::now();

        for i in 0..20 {
            limiter.allow_at("k", start + Duration::from_secs(i * 7));
            assert!(limiter.calls["k"].len() <= 3);
        }
    }

    #[test]
    fn test_reset_unknown_key_is_noop() {
        let mut limiter = limiter(1);
        limiter.reset("never-seen");
        assert!(limiter.allow("never-seen"));
    }

    #[test]
    fn test_default_settings() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.max_calls(), 10);
        assert_eq!(limiter.period(), Duration::from_secs(60));
    }

    #[test]
    fn test_try_new_rejects_non_positive_values() {
        assert!(RateLimiter::try_new(0, Duration::from_secs(1)).is_err());
        assert!(RateLimiter::try_new(1, Duration::ZERO).is_err());
        assert!(RateLimiter::try_new(1, Duration::from_millis(10)).is_ok());
    }
}
