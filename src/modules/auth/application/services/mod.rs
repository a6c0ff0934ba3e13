mod login_rate_limiter;

pub use login_rate_limiter::{
    LoginRateLimiter, RateLimitStatus, DEFAULT_LOCKOUT_SECS, DEFAULT_MAX_ATTEMPTS,
};
