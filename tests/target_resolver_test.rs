// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Target Resolver Tests
 * Canonical target derivation for domain-name and link assets
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use lonkero_fingerprint::config::ScanSettings;
use lonkero_fingerprint::errors::AgentError;
use lonkero_fingerprint::target::{decode_request, resolve};
use lonkero_fingerprint::types::{InboundMessage, ScanRequest, Scheme};

fn settings(https: bool, port: u16) -> ScanSettings {
    ScanSettings { https, port }
}

#[test]
fn test_domain_with_https_preferred_embeds_port_443() {
    let request = ScanRequest::DomainName {
        name: "test.ostorlab.co".to_string(),
    };

    let target = resolve(&request, &settings(true, 443)).unwrap();

    assert_eq!(target.url, "https://test.ostorlab.co:443");
    assert_eq!(target.domain, "test.ostorlab.co");
    assert_eq!(target.scheme, Scheme::Https);
    assert_eq!(target.port, 443);
}

#[test]
fn test_domain_with_http_preferred_embeds_port_80() {
    let request = ScanRequest::DomainName {
        name: "example.com".to_string(),
    };

    let target = resolve(&request, &settings(false, 80)).unwrap();

    assert_eq!(target.url, "http://example.com:80");
    assert_eq!(target.scheme, Scheme::Http);
    assert_eq!(target.port, 80);
}

#[test]
fn test_domain_always_embeds_configured_port_even_when_unconventional() {
    let request = ScanRequest::DomainName {
        name: "example.com".to_string(),
    };

    let target = resolve(&request, &settings(true, 8443)).unwrap();

    assert_eq!(target.url, "https://example.com:8443");
    assert_eq!(target.port, 8443);
}

#[test]
fn test_https_link_without_explicit_port_defaults_to_443() {
    let request = ScanRequest::Link {
        url: "https://example.com".to_string(),
    };

    let target = resolve(&request, &settings(true, 443)).unwrap();

    // The original URL string is kept, not reconstructed
    assert_eq!(target.url, "https://example.com");
    assert_eq!(target.domain, "example.com");
    assert_eq!(target.scheme, Scheme::Https);
    assert_eq!(target.port, 443);
}

#[test]
fn test_http_link_without_explicit_port_defaults_to_80() {
    let request = ScanRequest::Link {
        url: "http://example.com".to_string(),
    };

    let target = resolve(&request, &settings(true, 443)).unwrap();

    assert_eq!(target.url, "http://example.com");
    assert_eq!(target.scheme, Scheme::Http);
    assert_eq!(target.port, 80);
}

#[test]
fn test_link_with_explicit_port_wins_over_conventional() {
    let request = ScanRequest::Link {
        url: "https://example.com:8080/app".to_string(),
    };

    let target = resolve(&request, &settings(true, 443)).unwrap();

    assert_eq!(target.url, "https://example.com:8080/app");
    assert_eq!(target.domain, "example.com");
    assert_eq!(target.port, 8080);
}

#[test]
fn test_scheme_less_link_falls_back_to_preferred_scheme() {
    let request = ScanRequest::Link {
        url: "example.com".to_string(),
    };

    let target = resolve(&request, &settings(true, 443)).unwrap();

    assert_eq!(target.url, "example.com");
    assert_eq!(target.domain, "example.com");
    assert_eq!(target.scheme, Scheme::Https);
    assert_eq!(target.port, 443);

    let target = resolve(&request, &settings(false, 80)).unwrap();
    assert_eq!(target.scheme, Scheme::Http);
    assert_eq!(target.port, 80);
}

#[test]
fn test_link_scheme_wins_over_preference() {
    let request = ScanRequest::Link {
        url: "http://example.com".to_string(),
    };

    // https preferred, but the link carries an explicit scheme
    let target = resolve(&request, &settings(true, 443)).unwrap();
    assert_eq!(target.scheme, Scheme::Http);
}

#[test]
fn test_decode_domain_message() {
    let message = InboundMessage {
        selector: "v3.asset.domain_name".to_string(),
        data: serde_json::json!({ "name": "test.ostorlab.co" }),
    };

    let request = decode_request(&message).unwrap();
    assert_eq!(
        request,
        ScanRequest::DomainName {
            name: "test.ostorlab.co".to_string()
        }
    );
}

#[test]
fn test_decode_link_message() {
    let message = InboundMessage {
        selector: "v3.asset.link".to_string(),
        data: serde_json::json!({ "url": "https://ostorlab.co" }),
    };

    let request = decode_request(&message).unwrap();
    assert_eq!(
        request,
        ScanRequest::Link {
            url: "https://ostorlab.co".to_string()
        }
    );
}

#[test]
fn test_decode_unknown_selector_is_unsupported() {
    let message = InboundMessage {
        selector: "v3.asset.file.android.apk".to_string(),
        data: serde_json::json!({ "content": "..." }),
    };

    let err = decode_request(&message).unwrap_err();
    assert!(matches!(err, AgentError::UnsupportedRequestKind { .. }));
}

#[test]
fn test_decode_domain_message_without_name_is_unsupported() {
    let message = InboundMessage {
        selector: "v3.asset.domain_name".to_string(),
        data: serde_json::json!({}),
    };

    let err = decode_request(&message).unwrap_err();
    assert!(matches!(err, AgentError::UnsupportedRequestKind { .. }));
}
