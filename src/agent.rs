// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Agent Orchestration
 * Per-request pipeline: resolve, dedup, scan, map, emit
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::ScanSettings;
use crate::dedup::DedupStore;
use crate::engine::FingerprintEngine;
use crate::errors::AgentError;
use crate::mapper::map_findings;
use crate::reporting::{EventSink, VulnerabilityReport, VulnerabilityReporter};
use crate::target;
use crate::types::{InboundMessage, LIB_SELECTOR};

/// Terminal state of one processed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Target already scanned by this deployment; nothing emitted
    Skipped,
    /// Engine invocation failed or produced unusable output; nothing emitted
    ScanFailed,
    /// Findings mapped and emissions attempted
    Done { findings: usize, emitted: usize },
}

/// Orchestrator for one fingerprint request at a time. The engine, dedup
/// store, and both emission capabilities are injected so that hosting and
/// tests can swap transports freely.
pub struct FingerprintAgent {
    settings: ScanSettings,
    engine: Arc<dyn FingerprintEngine>,
    dedup: Arc<dyn DedupStore>,
    events: Arc<dyn EventSink>,
    vulns: Arc<dyn VulnerabilityReporter>,
}

impl FingerprintAgent {
    pub fn new(
        settings: ScanSettings,
        engine: Arc<dyn FingerprintEngine>,
        dedup: Arc<dyn DedupStore>,
        events: Arc<dyn EventSink>,
        vulns: Arc<dyn VulnerabilityReporter>,
    ) -> Self {
        Self {
            settings,
            engine,
            dedup,
            events,
            vulns,
        }
    }

    /// Process one inbound request to completion.
    ///
    /// Unsupported or unparseable requests surface as errors; scan-level
    /// failures are absorbed into the outcome so that one bad target never
    /// takes the worker down with it.
    pub async fn process(&self, message: InboundMessage) -> Result<ProcessOutcome> {
        info!("processing message with selector: {}", message.selector);

        let request = target::decode_request(&message)?;
        let resolved = target::resolve(&request, &self.settings)?;

        if !self.dedup.check_and_add(&resolved.url).await? {
            info!("target {} already scanned, skipping", resolved.url);
            return Ok(ProcessOutcome::Skipped);
        }

        let output = match self.engine.scan(&resolved.url).await {
            Ok(output) => output,
            Err(e @ AgentError::MalformedEngineOutput(_)) => {
                // Contract mismatch with the engine, not a target problem
                error!("engine output for {} is malformed: {}", resolved.url, e);
                return Ok(ProcessOutcome::ScanFailed);
            }
            Err(e) => {
                warn!("scan of {} failed: {}", resolved.url, e);
                return Ok(ProcessOutcome::ScanFailed);
            }
        };

        let findings = map_findings(&resolved, &output);
        let mut emitted = 0;

        for finding in &findings {
            let event = finding.to_event();
            match self.events.emit(LIB_SELECTOR, &event).await {
                Ok(()) => emitted += 1,
                Err(e) => warn!(
                    "failed to emit fingerprint event for `{}` on {}: {:#}",
                    finding.name, resolved.url, e
                ),
            }

            let report = VulnerabilityReport::for_finding(finding);
            match self.vulns.report(&report).await {
                Ok(()) => emitted += 1,
                Err(e) => warn!(
                    "failed to report vulnerability for `{}` on {}: {:#}",
                    finding.name, resolved.url, e
                ),
            }
        }

        info!(
            "scan of {} produced {} findings ({} emissions)",
            resolved.url,
            findings.len(),
            emitted
        );

        Ok(ProcessOutcome::Done {
            findings: findings.len(),
            emitted,
        })
    }
}
