// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Inbound Request Queue
 * Redis-backed job source for the fingerprint agent
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use deadpool_redis::{Config, Pool, Runtime};
use tracing::debug;

use crate::types::InboundMessage;

/// Queue key the upstream pipeline pushes scan requests onto
pub const REQUEST_QUEUE: &str = "fingerprint:queue";

#[derive(Clone)]
pub struct RedisQueue {
    pool: Pool,
}

impl RedisQueue {
    pub async fn new(redis_url: &str) -> Result<Self> {
        let cfg = Config::from_url(redis_url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create Redis pool")?;

        // Test connection
        let mut conn = pool.get().await.context("Failed to get Redis connection")?;
        let _: String = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("Failed to ping Redis")?;

        Ok(Self { pool })
    }

    /// Shared pool handle for the dedup store and the emission bus
    pub fn pool(&self) -> Pool {
        self.pool.clone()
    }

    /// Pop the next scan request (blocking with timeout)
    pub async fn pop_request(&self, timeout_secs: u64) -> Result<Option<InboundMessage>> {
        let mut conn = self.pool.get().await.context("Failed to get Redis connection")?;

        // BRPOP fingerprint:queue timeout
        let result: Option<(String, String)> = deadpool_redis::redis::cmd("BRPOP")
            .arg(REQUEST_QUEUE)
            .arg(timeout_secs)
            .query_async(&mut conn)
            .await
            .context("Failed to pop from queue")?;

        match result {
            Some((_, message_json)) => {
                let message: InboundMessage = serde_json::from_str(&message_json)
                    .context("Failed to deserialize scan request")?;
                debug!("popped scan request with selector {}", message.selector);
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }
}
