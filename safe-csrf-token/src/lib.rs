//! Sanitize untrusted text and rate-limit callers by key.
//!
//! ```
//! use safe_csrf_token::{token, RateLimiter};
//! use std::time::Duration;
//!
//! assert_eq!(token("<b>bold</b> & <i>text</i>"), "bold &amp; text");
//!
//! let mut limiter = RateLimiter::new(2, Duration::from_secs(60));
//! assert!(limiter.allow("user-1"));
//! assert!(limiter.allow("user-1"));
//! assert!(!limiter.allow("user-1"));
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(feature = "shared")]
mod app_context;

#[cfg(feature = "shared")]
pub use app_context::AppContext;

pub use application::{sanitize, token, token_value};
pub use domain::RateLimitConfig;
pub use infrastructure::security::{InputSanitizer, RateLimiter, DEFAULT_KEY};
pub use safe_csrf_errors::AppError;

#[cfg(feature = "shared")]
pub use infrastructure::security::SharedRateLimiter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
