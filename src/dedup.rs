// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Dedup Guard
 * Persistent target set preventing redundant rescans
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use deadpool_redis::Pool;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

/// Set key holding every canonical target URL this deployment has scanned
pub const DEDUP_NAMESPACE: &str = "fingerprint:scanned";

/// Membership check and insertion in a single atomic step. Returns true
/// when the member is new (proceed with the scan), false when it was
/// already present (skip).
#[async_trait]
pub trait DedupStore: Send + Sync {
    async fn check_and_add(&self, member: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct RedisDedupStore {
    pool: Pool,
    namespace: String,
}

impl RedisDedupStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            namespace: DEDUP_NAMESPACE.to_string(),
        }
    }

    pub fn with_namespace(pool: Pool, namespace: impl Into<String>) -> Self {
        Self {
            pool,
            namespace: namespace.into(),
        }
    }
}

#[async_trait]
impl DedupStore for RedisDedupStore {
    async fn check_and_add(&self, member: &str) -> Result<bool> {
        let mut conn = self.pool.get().await.context("Failed to get Redis connection")?;

        // SADD replies 1 for a new member, 0 for an existing one; the
        // round trip is the atomicity guarantee across concurrent workers.
        let added: i64 = deadpool_redis::redis::cmd("SADD")
            .arg(&self.namespace)
            .arg(member)
            .query_async(&mut conn)
            .await
            .context("Failed to check dedup set")?;

        debug!("dedup check for {}: added={}", member, added);
        Ok(added == 1)
    }
}

/// In-process store for tests and single-node runs
#[derive(Default)]
pub struct MemoryDedupStore {
    seen: Mutex<HashSet<String>>,
}

impl MemoryDedupStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DedupStore for MemoryDedupStore {
    async fn check_and_add(&self, member: &str) -> Result<bool> {
        let mut seen = self.seen.lock().expect("dedup set lock poisoned");
        Ok(seen.insert(member.to_string()))
    }
}
