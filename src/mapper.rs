// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Result Mapper
 * Raw engine output to findings and outbound event payloads
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use crate::types::{EngineOutput, Finding, FingerprintEvent, Target};

/// Map raw engine output onto findings, one per reported technology.
///
/// Names and versions pass through as given, including empty names —
/// filtering is a downstream concern. The library type is the name of the
/// first category the engine listed; repeated technology names are kept.
pub fn map_findings(target: &Target, output: &EngineOutput) -> Vec<Finding> {
    output
        .technologies
        .iter()
        .map(|tech| Finding {
            target: target.clone(),
            name: tech.name.clone(),
            version: tech.version.clone(),
            library_type: tech.categories.first().map(|c| c.name.clone()),
        })
        .collect()
}

impl Finding {
    /// Human-readable description shared by the event payload and the
    /// vulnerability record
    pub fn technical_detail(&self) -> String {
        format!(
            "Found library `{}`, version `{}`, of type `{}` in domain `{}`",
            self.name,
            self.version.as_deref().unwrap_or("unknown"),
            self.library_type.as_deref().unwrap_or("unknown"),
            self.target.domain
        )
    }

    /// Build the outbound fingerprint event. Optional fields collapse to
    /// the empty-string sentinel at this boundary only.
    pub fn to_event(&self) -> FingerprintEvent {
        FingerprintEvent {
            name: self.target.url.clone(),
            port: self.target.port,
            schema: self.target.scheme,
            library_name: self.name.clone(),
            library_version: self.version.clone().unwrap_or_default(),
            library_type: self.library_type.clone().unwrap_or_default(),
            detail: self.technical_detail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Scheme, Technology};

    fn target() -> Target {
        Target {
            url: "https://example.com:443".to_string(),
            domain: "example.com".to_string(),
            scheme: Scheme::Https,
            port: 443,
        }
    }

    fn category(name: &str) -> Category {
        Category {
            id: 1,
            slug: name.to_lowercase(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_first_category_wins() {
        let output = EngineOutput {
            technologies: vec![Technology {
                name: "Netlify".to_string(),
                categories: vec![category("CDN"), category("PaaS")],
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = map_findings(&target(), &output);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].library_type.as_deref(), Some("CDN"));
    }

    #[test]
    fn test_missing_categories_leave_type_unset() {
        let output = EngineOutput {
            technologies: vec![Technology {
                name: "webpack".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let findings = map_findings(&target(), &output);
        assert_eq!(findings[0].library_type, None);
        assert_eq!(findings[0].to_event().library_type, "");
    }

    #[test]
    fn test_event_uses_sentinels_and_detail_names_unknowns() {
        let finding = Finding {
            target: target(),
            name: "Vuetify".to_string(),
            version: None,
            library_type: None,
        };

        let event = finding.to_event();
        assert_eq!(event.name, "https://example.com:443");
        assert_eq!(event.library_version, "");
        assert_eq!(
            event.detail,
            "Found library `Vuetify`, version `unknown`, of type `unknown` in domain `example.com`"
        );
    }

    #[test]
    fn test_empty_name_passes_through() {
        let output = EngineOutput {
            technologies: vec![Technology::default()],
            ..Default::default()
        };

        let findings = map_findings(&target(), &output);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].name, "");
    }
}
