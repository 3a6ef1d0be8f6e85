// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Agent Error Types
 * Production-ready error handling with thiserror
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Agent error taxonomy. Every variant is scoped to a single request;
/// nothing here is fatal to the hosting process.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Inbound message matches neither recognized request shape
    #[error("unsupported request kind: {selector}")]
    UnsupportedRequestKind { selector: String },

    /// Link request whose URL cannot be turned into a scan target
    #[error("invalid target `{url}`: {reason}")]
    InvalidTarget { url: String, reason: String },

    /// Engine invocation returned a non-success status or never completed
    #[error("engine invocation failed (status {status:?}): {stderr}")]
    ScanFailure {
        status: Option<i32>,
        stderr: String,
    },

    /// Engine reported success but its output does not match the contract
    #[error("malformed engine output: {0}")]
    MalformedEngineOutput(#[from] serde_json::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;
