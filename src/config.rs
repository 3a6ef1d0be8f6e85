// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Agent Configuration
 * Environment-driven configuration with validation
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub redis: RedisConfig,

    #[validate(nested)]
    pub engine: EngineConfig,

    #[validate(nested)]
    pub scan: ScanSettings,

    #[validate(nested)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedisConfig {
    #[validate(url)]
    pub url: String,
}

/// Invocation line for the external fingerprint engine. The target URL is
/// appended as the sole positional argument at scan time.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    #[validate(length(min = 1))]
    #[serde(default = "default_engine_command")]
    pub command: String,

    #[serde(default = "default_engine_args")]
    pub args: Vec<String>,

    #[serde(default = "default_engine_working_dir")]
    pub working_dir: Option<String>,

    #[validate(range(min = 1, max = 3600))]
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

/// Agent-level scan flags applied when only a bare domain name arrives
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanSettings {
    #[serde(default = "default_true")]
    pub https: bool,

    #[validate(range(min = 1, max = 65535))]
    #[serde(default = "default_scan_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(range(min = 1, max = 256))]
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_engine_command() -> String {
    "node".to_string()
}

fn default_engine_args() -> Vec<String> {
    vec!["src/drivers/npm/cli.js".to_string()]
}

fn default_engine_working_dir() -> Option<String> {
    Some("/wappalyzer".to_string())
}

fn default_engine_timeout() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_scan_port() -> u16 {
    443
}

fn default_workers() -> usize {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redis: RedisConfig {
                url: "redis://127.0.0.1:6379".to_string(),
            },
            engine: EngineConfig {
                command: default_engine_command(),
                args: default_engine_args(),
                working_dir: default_engine_working_dir(),
                timeout_secs: default_engine_timeout(),
            },
            scan: ScanSettings {
                https: true,
                port: default_scan_port(),
            },
            server: ServerConfig {
                workers: default_workers(),
            },
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults
    ///
    /// Supports the following environment variables:
    /// - REDIS_URL: Redis connection URL
    /// - ENGINE_COMMAND: Fingerprint engine executable
    /// - ENGINE_WORKING_DIR: Working directory for the engine process
    /// - ENGINE_TIMEOUT_SECS: Bounded wait for one engine invocation
    /// - SCAN_HTTPS: Prefer https when resolving bare domain names
    /// - SCAN_PORT: Port embedded into bare domain-name targets
    /// - WORKERS: Number of worker loops
    /// - LOG_LEVEL: Logging level
    pub fn from_env() -> Result<Self> {
        let mut config = AppConfig::default();

        if let Ok(redis_url) = std::env::var("REDIS_URL") {
            config.redis.url = redis_url;
        }

        if let Ok(command) = std::env::var("ENGINE_COMMAND") {
            config.engine.command = command;
        }

        if let Ok(dir) = std::env::var("ENGINE_WORKING_DIR") {
            config.engine.working_dir = if dir.is_empty() { None } else { Some(dir) };
        }

        if let Ok(timeout) = std::env::var("ENGINE_TIMEOUT_SECS") {
            config.engine.timeout_secs = timeout
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid ENGINE_TIMEOUT_SECS value"))?;
        }

        if let Ok(https) = std::env::var("SCAN_HTTPS") {
            config.scan.https = https
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SCAN_HTTPS value"))?;
        }

        if let Ok(port) = std::env::var("SCAN_PORT") {
            config.scan.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SCAN_PORT value"))?;
        }

        if let Ok(workers) = std::env::var("WORKERS") {
            config.server.workers = workers
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid WORKERS value"))?;
        }

        if let Ok(log_level) = std::env::var("LOG_LEVEL") {
            config.observability.log_level = log_level;
        }

        config.validate().context("Invalid configuration")?;

        Ok(config)
    }
}
