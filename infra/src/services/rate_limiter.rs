//! Redis-based rate limiter implementation
//!
//! Fixed-window counters via INCR + EXPIRE. The key space mirrors the
//! in-memory limiter in `lx_core`: OTP dispatches per phone, access-code
//! guesses per listing.

use async_trait::async_trait;
use redis::AsyncCommands;

use lx_core::services::auth::RateLimiterTrait;
use lx_shared::config::CacheConfig;

use crate::InfrastructureError;

/// Maximum OTP dispatches per phone number per window
const MAX_SMS_PER_WINDOW: i64 = 3;

/// Maximum failed access-code guesses per listing per window
const MAX_ACCESS_CODE_ATTEMPTS_PER_WINDOW: i64 = 10;

/// Window length for both counters
const WINDOW_SECONDS: i64 = 3600;

/// Redis-based implementation of the rate limiter trait
pub struct RedisRateLimiter {
    client: redis::Client,
    key_prefix: String,
}

impl RedisRateLimiter {
    /// Create a new Redis-based rate limiter
    pub fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| InfrastructureError::Cache(format!("Failed to open Redis client: {}", e)))?;

        Ok(Self {
            client,
            key_prefix: config.key_prefix.clone().unwrap_or_else(|| "landx".to_string()),
        })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, String> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| format!("Redis connection failed: {}", e))
    }

    fn sms_key(&self, phone: &str) -> String {
        format!("{}:rate:sms:{}", self.key_prefix, phone)
    }

    fn access_key(&self, listing_id: &str) -> String {
        format!("{}:rate:access_code:{}", self.key_prefix, listing_id)
    }

    async fn check(&self, key: &str, max: i64) -> Result<bool, String> {
        let mut conn = self.connection().await?;

        let count: Option<i64> = conn
            .get(key)
            .await
            .map_err(|e| format!("Failed to read counter: {}", e))?;

        Ok(count.unwrap_or(0) >= max)
    }

    async fn increment(&self, key: &str) -> Result<i64, String> {
        let mut conn = self.connection().await?;

        let count: i64 = conn
            .incr(key, 1)
            .await
            .map_err(|e| format!("Failed to increment counter: {}", e))?;

        // First hit in a window starts the expiry clock
        if count == 1 {
            let _: i64 = redis::cmd("EXPIRE")
                .arg(key)
                .arg(WINDOW_SECONDS)
                .query_async(&mut conn)
                .await
                .map_err(|e| format!("Failed to set counter expiry: {}", e))?;
        }

        Ok(count)
    }

    async fn reset_time(&self, key: &str) -> Result<Option<i64>, String> {
        let mut conn = self.connection().await?;

        let ttl: i64 = conn
            .ttl(key)
            .await
            .map_err(|e| format!("Failed to read counter TTL: {}", e))?;

        // -2 = no key, -1 = no expiry set
        Ok((ttl > 0).then_some(ttl))
    }
}

#[async_trait]
impl RateLimiterTrait for RedisRateLimiter {
    async fn check_sms_rate_limit(&self, phone: &str) -> Result<bool, String> {
        self.check(&self.sms_key(phone), MAX_SMS_PER_WINDOW).await
    }

    async fn increment_sms_counter(&self, phone: &str) -> Result<i64, String> {
        self.increment(&self.sms_key(phone)).await
    }

    async fn get_sms_rate_limit_reset_time(&self, phone: &str) -> Result<Option<i64>, String> {
        self.reset_time(&self.sms_key(phone)).await
    }

    async fn check_access_code_attempts(&self, listing_id: &str) -> Result<bool, String> {
        self.check(
            &self.access_key(listing_id),
            MAX_ACCESS_CODE_ATTEMPTS_PER_WINDOW,
        )
        .await
    }

    async fn increment_access_code_attempts(&self, listing_id: &str) -> Result<i64, String> {
        self.increment(&self.access_key(listing_id)).await
    }

    async fn get_access_code_reset_time(&self, listing_id: &str) -> Result<Option<i64>, String> {
        self.reset_time(&self.access_key(listing_id)).await
    }
}
