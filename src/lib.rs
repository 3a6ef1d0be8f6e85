// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Fingerprint Agent Library
 * Exposes agent modules for testing
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

pub mod config;
pub mod errors;
pub mod types;

// Target normalization
pub mod target;

// Dedup guard backed by the persistence layer
pub mod dedup;

// External fingerprint engine invocation
pub mod engine;

// Raw engine output to findings
pub mod mapper;

// Fingerprint event and vulnerability emission
pub mod reporting;

// Inbound job queue
pub mod queue;

// Per-request orchestration
pub mod agent;
