// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Engine Invocation
 * Subprocess driver for the external technology fingerprinting CLI
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::{AgentError, AgentResult};
use crate::types::EngineOutput;

/// One blocking fingerprint run against a single URL. No retries; a failed
/// invocation is reported to the caller and the request ends there.
#[async_trait]
pub trait FingerprintEngine: Send + Sync {
    async fn scan(&self, url: &str) -> AgentResult<EngineOutput>;
}

/// Subprocess implementation. The engine is executed with the configured
/// command line plus the target URL as its sole positional argument, and
/// must print the technology report as JSON on stdout.
pub struct EngineClient {
    command: String,
    args: Vec<String>,
    working_dir: Option<String>,
    timeout: Duration,
}

impl EngineClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[async_trait]
impl FingerprintEngine for EngineClient {
    async fn scan(&self, url: &str) -> AgentResult<EngineOutput> {
        info!("starting a new scan for {}", url);

        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(AgentError::ScanFailure {
                    status: None,
                    stderr: format!("failed to execute engine: {}", e),
                })
            }
            Err(_) => {
                return Err(AgentError::ScanFailure {
                    status: None,
                    stderr: format!("engine timed out after {:?}", self.timeout),
                })
            }
        };

        if !output.status.success() {
            return Err(AgentError::ScanFailure {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        debug!(
            "engine finished for {} ({} bytes of output)",
            url,
            output.stdout.len()
        );

        let parsed: EngineOutput = serde_json::from_slice(&output.stdout)?;
        Ok(parsed)
    }
}
