use crate::domain::RateLimitConfig;
use crate::infrastructure::security::SharedRateLimiter;
use safe_csrf_errors::AppError;

#[derive(Clone)]
pub struct AppContext {
    pub config: RateLimitConfig,
    pub rate_limiter: SharedRateLimiter,
}

impl AppContext {
    pub fn new(config: RateLimitConfig) -> Result<Self, AppError> {
        let rate_limiter = SharedRateLimiter::from_config(&config)?;
        Ok(Self {
            config,
            rate_limiter,
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let config = RateLimitConfig::from_env()?;
        tracing::info!(
            max_calls = config.max_calls,
            period_secs = config.period_secs,
            "Rate limiter configured"
        );
        Self::new(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_builds_limiter_from_config() {
        let ctx = AppContext::new(RateLimitConfig::new(1, Duration::from_secs(5))).unwrap();
        assert_eq!(ctx.rate_limiter.max_calls(), 1);
        assert_eq!(ctx.rate_limiter.period(), Duration::from_secs(5));

        let shared = ctx.clone();
        assert!(ctx.rate_limiter.allow("ip"));
        assert!(!shared.rate_limiter.allow("ip"));
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        assert!(std::env::var_os("SAFE_CSRF_MAX_CALLS").is_none());
        assert!(std::env::var_os("SAFE_CSRF_PERIOD_SECS").is_none());

        let ctx = AppContext::from_env().unwrap();
        assert_eq!(ctx.config, RateLimitConfig::default());
        assert_eq!(ctx.rate_limiter.max_calls(), 10);
        assert_eq!(ctx.rate_limiter.period(), Duration::from_secs(60));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = AppContext::new(RateLimitConfig::default().with_max_calls(0)).err();
        assert!(matches!(err, Some(AppError::InvalidConfig(_))));
    }
}
