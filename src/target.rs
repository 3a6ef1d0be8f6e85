// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Target Resolver
 * Canonical scan target derivation from inbound asset messages
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::ScanSettings;
use crate::errors::{AgentError, AgentResult};
use crate::types::{
    InboundMessage, ScanRequest, Scheme, Target, DOMAIN_SELECTOR_PREFIX, LINK_SELECTOR_PREFIX,
};

#[derive(Deserialize)]
struct DomainAsset {
    name: String,
}

#[derive(Deserialize)]
struct LinkAsset {
    url: String,
}

/// Decode an inbound message into a scan request. Any selector outside the
/// two recognized asset kinds is rejected here, before any side effects.
pub fn decode_request(message: &InboundMessage) -> AgentResult<ScanRequest> {
    if message.selector.starts_with(DOMAIN_SELECTOR_PREFIX) {
        let asset: DomainAsset = serde_json::from_value(message.data.clone()).map_err(|_| {
            AgentError::UnsupportedRequestKind {
                selector: message.selector.clone(),
            }
        })?;
        Ok(ScanRequest::DomainName { name: asset.name })
    } else if message.selector.starts_with(LINK_SELECTOR_PREFIX) {
        let asset: LinkAsset = serde_json::from_value(message.data.clone()).map_err(|_| {
            AgentError::UnsupportedRequestKind {
                selector: message.selector.clone(),
            }
        })?;
        Ok(ScanRequest::Link { url: asset.url })
    } else {
        Err(AgentError::UnsupportedRequestKind {
            selector: message.selector.clone(),
        })
    }
}

/// Derive the canonical target for a request.
///
/// Bare domain names take scheme and port from the agent settings and the
/// configured port is always embedded in the canonical URL. Link requests
/// keep their original URL string untouched; scheme and port are only
/// inferred for the structured fields. The asymmetry is intentional and
/// downstream consumers rely on it.
pub fn resolve(request: &ScanRequest, settings: &ScanSettings) -> AgentResult<Target> {
    let preferred = if settings.https {
        Scheme::Https
    } else {
        Scheme::Http
    };

    let target = match request {
        ScanRequest::DomainName { name } => {
            let port = settings.port;
            Target {
                url: format!("{}://{}:{}", preferred, name, port),
                domain: name.clone(),
                scheme: preferred,
                port,
            }
        }
        ScanRequest::Link { url } => resolve_link(url, preferred)?,
    };

    debug!(
        "resolved target: url={} domain={} scheme={} port={}",
        target.url, target.domain, target.scheme, target.port
    );
    Ok(target)
}

fn resolve_link(raw: &str, preferred: Scheme) -> AgentResult<Target> {
    let parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        // Scheme-less links are re-parsed with the preferred scheme
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("{}://{}", preferred, raw)).map_err(|e| {
                AgentError::InvalidTarget {
                    url: raw.to_string(),
                    reason: e.to_string(),
                }
            })?
        }
        Err(e) => {
            return Err(AgentError::InvalidTarget {
                url: raw.to_string(),
                reason: e.to_string(),
            })
        }
    };

    let scheme = match parsed.scheme() {
        "http" => Scheme::Http,
        "https" => Scheme::Https,
        other => {
            return Err(AgentError::InvalidTarget {
                url: raw.to_string(),
                reason: format!("unsupported scheme `{}`", other),
            })
        }
    };

    let domain = parsed
        .host_str()
        .ok_or_else(|| AgentError::InvalidTarget {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        })?
        .to_string();

    // Explicit non-zero port wins, then the scheme's conventional port.
    let port = match parsed.port() {
        Some(explicit) if explicit != 0 => explicit,
        _ => scheme.default_port(),
    };

    Ok(Target {
        url: raw.to_string(),
        domain,
        scheme,
        port,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(https: bool, port: u16) -> ScanSettings {
        ScanSettings { https, port }
    }

    #[test]
    fn test_domain_name_embeds_configured_port() {
        let request = ScanRequest::DomainName {
            name: "example.com".to_string(),
        };
        let target = resolve(&request, &settings(true, 8443)).unwrap();
        assert_eq!(target.url, "https://example.com:8443");
        assert_eq!(target.port, 8443);
    }

    #[test]
    fn test_link_keeps_original_url_string() {
        let request = ScanRequest::Link {
            url: "https://example.com".to_string(),
        };
        let target = resolve(&request, &settings(true, 443)).unwrap();
        assert_eq!(target.url, "https://example.com");
        assert_eq!(target.domain, "example.com");
    }

    #[test]
    fn test_link_with_unsupported_scheme_rejected() {
        let request = ScanRequest::Link {
            url: "ftp://example.com/pub".to_string(),
        };
        let err = resolve(&request, &settings(true, 443)).unwrap_err();
        assert!(matches!(err, AgentError::InvalidTarget { .. }));
    }
}
