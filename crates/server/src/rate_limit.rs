use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use configs::RateLimitConfig;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::observability::RATE_LIMITED_TOTAL;
use crate::routes::ServerState;

/// Token bucket holding up to `burst` permits, refilled continuously at `per_second`.
#[derive(Debug)]
pub struct TokenBucket {
    burst: f64,
    per_second: f64,
    available: f64,
    refilled_at: Instant,
}

impl TokenBucket {
    pub fn new(burst: u64, per_second: u64) -> Self {
        Self {
            burst: burst as f64,
            per_second: per_second as f64,
            available: burst as f64,
            refilled_at: Instant::now(),
        }
    }

    /// Take one permit if available.
    pub fn take(&mut self) -> bool {
        self.refill_at(Instant::now());
        if self.available >= 1.0 {
            self.available -= 1.0;
            debug!(remaining = self.available as u64, "permit granted");
            true
        } else {
            warn!(burst = self.burst as u64, "room api rate limit exceeded");
            false
        }
    }

    fn refill_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.refilled_at).as_secs_f64();
        self.available = (self.available + elapsed * self.per_second).min(self.burst);
        self.refilled_at = now;
    }
}

/// Process-wide limiter shared by every room route.
#[derive(Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<TokenBucket>>,
    enabled: bool,
}

impl RateLimiter {
    pub fn from_config(cfg: &RateLimitConfig) -> Self {
        Self {
            bucket: Arc::new(Mutex::new(TokenBucket::new(cfg.burst, cfg.requests_per_second))),
            enabled: cfg.enabled,
        }
    }

    pub async fn allow(&self) -> bool {
        if !self.enabled {
            return true;
        }
        self.bucket.lock().await.take()
    }
}

/// Middleware: reject with 429 once the shared bucket is empty.
pub async fn enforce(State(state): State<ServerState>, req: Request, next: Next) -> Result<Response, ApiError> {
    if !state.limiter.allow().await {
        RATE_LIMITED_TOTAL.inc();
        return Err(ApiError::TooManyRequests);
    }
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn bucket_drains_after_burst() {
        let mut bucket = TokenBucket::new(3, 1);
        assert!(bucket.take());
        assert!(bucket.take());
        assert!(bucket.take());
        assert!(!bucket.take());
    }

    #[test]
    fn bucket_refills_with_elapsed_time_up_to_burst() {
        let mut bucket = TokenBucket::new(2, 1);
        let start = bucket.refilled_at;
        bucket.available = 0.0;

        bucket.refill_at(start + Duration::from_millis(500));
        assert!(bucket.available < 1.0);

        bucket.refill_at(start + Duration::from_secs(1));
        assert!(bucket.available >= 1.0);

        bucket.refill_at(start + Duration::from_secs(60));
        assert_eq!(bucket.available, 2.0);
    }

    #[tokio::test]
    async fn default_config_allows_ten_then_blocks() {
        let limiter = RateLimiter::from_config(&RateLimitConfig::default());
        for _ in 0..10 {
            assert!(limiter.allow().await);
        }
        assert!(!limiter.allow().await);
    }

    #[tokio::test]
    async fn disabled_limiter_never_blocks() {
        let limiter = RateLimiter::from_config(&RateLimitConfig { enabled: false, requests_per_second: 1, burst: 1 });
        for _ in 0..100 {
            assert!(limiter.allow().await);
        }
    }
}
