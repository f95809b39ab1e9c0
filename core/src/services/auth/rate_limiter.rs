//! Rate limiting trait and in-memory implementation
//!
//! Two dimensions are tracked: OTP dispatches per phone number, and access
//! code guesses per listing (the 4-digit code has only 10,000 possible
//! values). The Redis-backed implementation lives in `lx_infra`.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Rate limiting service trait
#[async_trait]
pub trait RateLimiterTrait: Send + Sync {
    /// Check if a phone number has exceeded the OTP dispatch limit
    async fn check_sms_rate_limit(&self, phone: &str) -> Result<bool, String>;

    /// Increment the OTP dispatch counter for a phone number
    async fn increment_sms_counter(&self, phone: &str) -> Result<i64, String>;

    /// Remaining time until the phone's dispatch window resets (seconds)
    async fn get_sms_rate_limit_reset_time(&self, phone: &str) -> Result<Option<i64>, String>;

    /// Check if a listing has exceeded the access-code guess limit
    async fn check_access_code_attempts(&self, listing_id: &str) -> Result<bool, String>;

    /// Increment the failed access-code guess counter for a listing
    async fn increment_access_code_attempts(&self, listing_id: &str) -> Result<i64, String>;

    /// Remaining time until the listing's guess window resets (seconds)
    async fn get_access_code_reset_time(&self, listing_id: &str) -> Result<Option<i64>, String>;
}

/// Maximum OTP dispatches per phone number per window
const MAX_SMS_PER_WINDOW: i64 = 3;

/// Maximum failed access-code guesses per listing per window
const MAX_ACCESS_CODE_ATTEMPTS_PER_WINDOW: i64 = 10;

/// Window length for both counters
const WINDOW_SECONDS: i64 = 3600;

struct Counter {
    count: i64,
    window_started_at: DateTime<Utc>,
}

/// In-memory rate limiter for tests and no-Redis development
pub struct InMemoryRateLimiter {
    counters: RwLock<HashMap<String, Counter>>,
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(HashMap::new()),
        }
    }

    async fn check(&self, key: &str, max: i64) -> bool {
        let counters = self.counters.read().await;
        match counters.get(key) {
            Some(counter) if !Self::window_elapsed(counter) => counter.count >= max,
            _ => false,
        }
    }

    async fn increment(&self, key: &str) -> i64 {
        let mut counters = self.counters.write().await;
        let counter = counters
            .entry(key.to_string())
            .or_insert_with(|| Counter {
                count: 0,
                window_started_at: Utc::now(),
            });

        if Self::window_elapsed(counter) {
            counter.count = 0;
            counter.window_started_at = Utc::now();
        }

        counter.count += 1;
        counter.count
    }

    async fn reset_time(&self, key: &str) -> Option<i64> {
        let counters = self.counters.read().await;
        counters.get(key).and_then(|counter| {
            let elapsed = Utc::now() - counter.window_started_at;
            let remaining = WINDOW_SECONDS - elapsed.num_seconds();
            (remaining > 0).then_some(remaining)
        })
    }

    fn window_elapsed(counter: &Counter) -> bool {
        Utc::now() - counter.window_started_at >= Duration::seconds(WINDOW_SECONDS)
    }

    fn sms_key(phone: &str) -> String {
        format!("sms:{}", phone)
    }

    fn access_key(listing_id: &str) -> String {
        format!("access_code:{}", listing_id)
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimiterTrait for InMemoryRateLimiter {
    async fn check_sms_rate_limit(&self, phone: &str) -> Result<bool, String> {
        Ok(self.check(&Self::sms_key(phone), MAX_SMS_PER_WINDOW).await)
    }

    async fn increment_sms_counter(&self, phone: &str) -> Result<i64, String> {
        Ok(self.increment(&Self::sms_key(phone)).await)
    }

    async fn get_sms_rate_limit_reset_time(&self, phone: &str) -> Result<Option<i64>, String> {
        Ok(self.reset_time(&Self::sms_key(phone)).await)
    }

    async fn check_access_code_attempts(&self, listing_id: &str) -> Result<bool, String> {
        Ok(self
            .check(
                &Self::access_key(listing_id),
                MAX_ACCESS_CODE_ATTEMPTS_PER_WINDOW,
            )
            .await)
    }

    async fn increment_access_code_attempts(&self, listing_id: &str) -> Result<i64, String> {
        Ok(self.increment(&Self::access_key(listing_id)).await)
    }

    async fn get_access_code_reset_time(&self, listing_id: &str) -> Result<Option<i64>, String> {
        Ok(self.reset_time(&Self::access_key(listing_id)).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sms_limit_trips_after_max() {
        let limiter = InMemoryRateLimiter::new();
        let phone = "+911234567890";

        for _ in 0..MAX_SMS_PER_WINDOW {
            assert!(!limiter.check_sms_rate_limit(phone).await.unwrap());
            limiter.increment_sms_counter(phone).await.unwrap();
        }

        assert!(limiter.check_sms_rate_limit(phone).await.unwrap());
    }

    #[tokio::test]
    async fn test_counters_are_keyed_independently() {
        let limiter = InMemoryRateLimiter::new();

        for _ in 0..MAX_SMS_PER_WINDOW {
            limiter.increment_sms_counter("+911111111111").await.unwrap();
        }

        assert!(limiter.check_sms_rate_limit("+911111111111").await.unwrap());
        assert!(!limiter.check_sms_rate_limit("+922222222222").await.unwrap());
    }

    #[tokio::test]
    async fn test_access_code_attempts_trip() {
        let limiter = InMemoryRateLimiter::new();
        let listing = "7e5c1c9e-0000-0000-0000-000000000000";

        for _ in 0..MAX_ACCESS_CODE_ATTEMPTS_PER_WINDOW {
            limiter
                .increment_access_code_attempts(listing)
                .await
                .unwrap();
        }

        assert!(limiter.check_access_code_attempts(listing).await.unwrap());
    }

    #[tokio::test]
    async fn test_reset_time_reported_within_window() {
        let limiter = InMemoryRateLimiter::new();
        let phone = "+911234567890";

        assert_eq!(
            limiter.get_sms_rate_limit_reset_time(phone).await.unwrap(),
            None
        );

        limiter.increment_sms_counter(phone).await.unwrap();
        let remaining = limiter
            .get_sms_rate_limit_reset_time(phone)
            .await
            .unwrap()
            .unwrap();
        assert!(remaining > 0 && remaining <= WINDOW_SECONDS);
    }
}
