// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Reporting
 * Outbound event and vulnerability emission capabilities
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use deadpool_redis::Pool;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::types::{Finding, FingerprintEvent, VULN_SELECTOR};

pub const VULNZ_TITLE: &str = "Web Tech Stack Fingerprint";
pub const VULNZ_RISK_RATING: RiskRating = RiskRating::Info;
pub const VULNZ_SHORT_DESCRIPTION: &str = "List of web technologies recognized";
pub const VULNZ_DESCRIPTION: &str = "Lists web technologies including content management systems(CMS), blogging platforms,\nstatistic/analytics packages, JavaScript libraries, web servers, embedded devices, version numbers, email addresses,\naccount IDs, web framework modules, SQL errors, and more.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskRating {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

/// Knowledge-base entry attached to every reported fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbEntry {
    pub title: String,
    pub risk_rating: RiskRating,
    pub short_description: String,
    pub description: String,
    pub references: HashMap<String, String>,
    pub security_issue: bool,
    pub privacy_issue: bool,
    pub has_public_exploit: bool,
    pub targeted_by_malware: bool,
    pub targeted_by_ransomware: bool,
    pub targeted_by_nation_state: bool,
}

impl KbEntry {
    /// The fixed entry for a recognized web technology stack
    pub fn tech_stack_fingerprint() -> Self {
        Self {
            title: VULNZ_TITLE.to_string(),
            risk_rating: VULNZ_RISK_RATING,
            short_description: VULNZ_SHORT_DESCRIPTION.to_string(),
            description: VULNZ_DESCRIPTION.to_string(),
            references: HashMap::new(),
            security_issue: true,
            privacy_issue: false,
            has_public_exploit: false,
            targeted_by_malware: false,
            targeted_by_ransomware: false,
            targeted_by_nation_state: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityReport {
    pub entry: KbEntry,
    pub technical_detail: String,
    pub risk_rating: RiskRating,
}

impl VulnerabilityReport {
    pub fn for_finding(finding: &Finding) -> Self {
        Self {
            entry: KbEntry::tech_stack_fingerprint(),
            technical_detail: finding.technical_detail(),
            risk_rating: RiskRating::Info,
        }
    }
}

/// Publishes fingerprint events to downstream consumers
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, selector: &str, event: &FingerprintEvent) -> Result<()>;
}

/// Delivers vulnerability reports to the vulnerability sink
#[async_trait]
pub trait VulnerabilityReporter: Send + Sync {
    async fn report(&self, report: &VulnerabilityReport) -> Result<()>;
}

/// Redis-backed implementation of both emission capabilities, sharing one
/// connection pool with the queue and the dedup store.
#[derive(Clone)]
pub struct RedisBus {
    pool: Pool,
}

impl RedisBus {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventSink for RedisBus {
    async fn emit(&self, selector: &str, event: &FingerprintEvent) -> Result<()> {
        let mut conn = self.pool.get().await.context("Failed to get Redis connection")?;
        let payload = serde_json::to_string(event).context("Failed to serialize event")?;

        deadpool_redis::redis::cmd("PUBLISH")
            .arg(selector)
            .arg(&payload)
            .query_async::<()>(&mut conn)
            .await
            .context("Failed to publish fingerprint event")?;

        debug!("emitted fingerprint event on {}: {}", selector, event.library_name);
        Ok(())
    }
}

#[async_trait]
impl VulnerabilityReporter for RedisBus {
    async fn report(&self, report: &VulnerabilityReport) -> Result<()> {
        let mut conn = self.pool.get().await.context("Failed to get Redis connection")?;
        let payload = serde_json::to_string(report).context("Failed to serialize report")?;

        deadpool_redis::redis::cmd("LPUSH")
            .arg(VULN_SELECTOR)
            .arg(&payload)
            .query_async::<()>(&mut conn)
            .await
            .context("Failed to push vulnerability report")?;

        Ok(())
    }
}
