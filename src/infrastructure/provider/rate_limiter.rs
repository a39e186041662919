//! Client-side request pacing.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Token bucket pacing outgoing provider requests.
///
/// Capacity equals the refill rate, so a full bucket allows one second's
/// worth of requests as a burst. Capacity is never below one token, so
/// fractional rates still grant a request once a whole token has refilled. Tokens refill continuously:
/// `tokens = min(tokens + elapsed_secs * refill_rate, capacity)`.
pub struct TokenBucketRateLimiter {
    bucket: Mutex<Bucket>,
    capacity: f64,
    refill_rate: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// Create a limiter allowing `requests_per_second` sustained requests.
    ///
    /// Callers validate the rate; non-positive values are clamped to a
    /// minimal positive rate.
    pub fn new(requests_per_second: f64) -> Self {
        let rate = requests_per_second.max(f64::EPSILON);
        Self {
            bucket: Mutex::new(Bucket {
                tokens: rate.max(1.0),
                last_refill: Instant::now(),
            }),
            capacity: rate.max(1.0),
            refill_rate: rate,
        }
    }

    /// Wait until a token is available, then consume it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                let tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.capacity);

                if tokens >= 1.0 {
                    bucket.tokens = tokens - 1.0;
                    bucket.last_refill = now;
                    return;
                }

                let tokens_needed = 1.0 - tokens;
                Duration::from_secs_f64((tokens_needed / self.refill_rate).max(0.001))
            };

            sleep(wait).await;
        }
    }

    /// Tokens available right now (for tests and diagnostics).
    pub async fn available_tokens(&self) -> f64 {
        let bucket = self.bucket.lock().await;
        let elapsed = Instant::now().duration_since(bucket.last_refill).as_secs_f64();
        (bucket.tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}
