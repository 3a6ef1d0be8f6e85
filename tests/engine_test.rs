// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Engine Invocation Tests
 * Subprocess driver behavior against stand-in engine commands
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::io::Write;

use lonkero_fingerprint::config::EngineConfig;
use lonkero_fingerprint::engine::{EngineClient, FingerprintEngine};
use lonkero_fingerprint::errors::AgentError;

const ENGINE_OUTPUT: &str = include_str!("fixtures/engine_output.json");

/// Stand-in engine: a shell one-liner that ignores the appended URL
/// argument (it lands in $0) and behaves like the real CLI would.
fn sh_engine(script: &str, timeout_secs: u64) -> EngineClient {
    EngineClient::new(&EngineConfig {
        command: "sh".to_string(),
        args: vec!["-c".to_string(), script.to_string()],
        working_dir: None,
        timeout_secs,
    })
}

#[tokio::test]
async fn test_successful_invocation_parses_technologies() {
    let mut fixture = tempfile::NamedTempFile::new().unwrap();
    fixture.write_all(ENGINE_OUTPUT.as_bytes()).unwrap();

    let engine = sh_engine(&format!("cat {}", fixture.path().display()), 30);
    let output = engine.scan("https://test.ostorlab.co:443").await.unwrap();

    assert_eq!(output.technologies.len(), 13);
    assert_eq!(output.technologies[0].name, "Node.js");
    assert_eq!(output.urls.len(), 2);
    assert_eq!(output.urls["https://ostorlab.co/"].status, 301);
}

#[tokio::test]
async fn test_non_zero_exit_is_scan_failure() {
    let engine = sh_engine("echo boom >&2; exit 3", 30);
    let err = engine.scan("https://example.com").await.unwrap_err();

    match err {
        AgentError::ScanFailure { status, stderr } => {
            assert_eq!(status, Some(3));
            assert!(stderr.contains("boom"));
        }
        other => panic!("expected ScanFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_output_is_malformed() {
    let engine = sh_engine("echo 'this is not json'", 30);
    let err = engine.scan("https://example.com").await.unwrap_err();

    assert!(matches!(err, AgentError::MalformedEngineOutput(_)));
}

#[tokio::test]
async fn test_missing_binary_is_scan_failure() {
    let engine = EngineClient::new(&EngineConfig {
        command: "/nonexistent/fingerprint-engine".to_string(),
        args: vec![],
        working_dir: None,
        timeout_secs: 30,
    });

    let err = engine.scan("https://example.com").await.unwrap_err();
    assert!(matches!(err, AgentError::ScanFailure { status: None, .. }));
}

#[tokio::test]
async fn test_timeout_expiry_is_scan_failure() {
    let engine = sh_engine("sleep 5", 1);
    let err = engine.scan("https://example.com").await.unwrap_err();

    match err {
        AgentError::ScanFailure { status, stderr } => {
            assert_eq!(status, None);
            assert!(stderr.contains("timed out"));
        }
        other => panic!("expected ScanFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_technology_list_parses() {
    let engine = sh_engine("echo '{\"technologies\": []}'", 30);
    let output = engine.scan("https://example.com").await.unwrap();

    assert!(output.technologies.is_empty());
    assert!(output.urls.is_empty());
}
