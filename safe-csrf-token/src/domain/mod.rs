mod rate_limit_config;

pub use rate_limit_config::{RateLimitConfig, DEFAULT_MAX_CALLS, DEFAULT_PERIOD_SECS};
