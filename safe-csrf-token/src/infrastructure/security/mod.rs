mod call_window;
mod input_sanitizer;
mod rate_limiter;
#[cfg(feature = "shared")]
mod shared_rate_limiter;

pub use input_sanitizer::InputSanitizer;
pub use rate_limiter::{RateLimiter, DEFAULT_KEY};
#[cfg(feature = "shared")]
pub use shared_rate_limiter::SharedRateLimiter;
