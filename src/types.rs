// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Agent Types
 * Wire shapes for inbound requests, engine output, and emitted events
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Selector carrying fingerprint events out to downstream consumers
pub const LIB_SELECTOR: &str = "v3.fingerprint.domain_name.service.library";

/// Selector carrying vulnerability reports
pub const VULN_SELECTOR: &str = "v3.report.vulnerability";

/// Selector prefix for domain-name assets
pub const DOMAIN_SELECTOR_PREFIX: &str = "v3.asset.domain_name";

/// Selector prefix for link assets
pub const LINK_SELECTOR_PREFIX: &str = "v3.asset.link";

/// Raw message popped from the inbound queue. The selector tags the asset
/// kind; the payload shape depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub selector: String,
    pub data: serde_json::Value,
}

/// Scan request decoded from an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRequest {
    /// Bare domain name; scheme and port come from agent settings
    DomainName { name: String },
    /// Full URL provided by an upstream crawler or user
    Link { url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Conventional port for the scheme
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical scan target. Immutable once resolved; `url` is the string
/// handed to the engine and used as the dedup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub url: String,
    pub domain: String,
    pub scheme: Scheme,
    pub port: u16,
}

/// Full engine output for one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineOutput {
    #[serde(default)]
    pub technologies: Vec<Technology>,

    /// Redirect chain observed by the engine, keyed by URL
    #[serde(default)]
    pub urls: HashMap<String, UrlStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlStatus {
    pub status: u16,
}

/// One detected technology as reported by the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Technology {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub confidence: u32,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    #[serde(default)]
    pub cpe: Option<String>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub slug: String,
    pub name: String,
}

/// One matched technology tied to its target. `library_type` is the name
/// of the first engine category, when any were reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub target: Target,
    pub name: String,
    pub version: Option<String>,
    pub library_type: Option<String>,
}

/// Outbound fingerprint event, one per finding. Optional fields collapse
/// to the empty-string sentinel at this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintEvent {
    pub name: String,
    pub port: u16,
    pub schema: Scheme,
    pub library_name: String,
    pub library_version: String,
    pub library_type: String,
    pub detail: String,
}
