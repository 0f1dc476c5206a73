// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for accessibility violations.
//!
//! Supports multiple output formats:
//! - Text: human-readable violations with WCAG references
//! - JSON: the serialized `ViolationSet`, as consumed by a remediation UI
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::violation::{Severity, ViolationSet};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Generate a report from violations
pub fn generate_report(violations: &ViolationSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(violations),
        OutputFormat::Json => generate_json_report(violations),
        OutputFormat::Sarif => generate_sarif_report(violations),
    }
}

fn generate_text_report(violations: &ViolationSet) -> String {
    let mut output = String::new();

    output.push_str("=== Remediabot Accessibility Report ===\n\n");

    if violations.is_empty() {
        output.push_str("No accessibility violations found.\n");
        return output;
    }

    let errors = violations.errors().len();
    let warnings = violations.warnings().len();

    output.push_str(&format!(
        "Found {} violation(s): {} error(s), {} warning(s)\n\n",
        violations.len(),
        errors,
        warnings
    ));

    for severity in &[Severity::Error, Severity::Warning, Severity::Info] {
        let group = violations.by_severity(*severity);
        if group.is_empty() {
            continue;
        }

        output.push_str(&format!("--- {} ({}) ---\n", severity, group.len()));

        for violation in group {
            output.push_str(&format!(
                "[{}] {}: {}\n",
                violation.rule_id, violation.rule_name, violation.message
            ));
            output.push_str(&format!("  Location: {}\n", violation.location_string()));

            if let Some(ref element) = violation.element {
                output.push_str(&format!("  Element: {}\n", element));
            }

            if let (Some(criterion), Some(level)) = (&violation.wcag_criterion, violation.wcag_level) {
                output.push_str(&format!("  WCAG: {} (Level {})\n", criterion, level));
            }

            if let Some(ref link) = violation.link {
                output.push_str(&format!("  See: {}\n", link));
            }

            if let Some(ref impact) = violation.impact {
                let groups = impact.affected_groups();
                if !groups.is_empty() {
                    output.push_str(&format!("  Affects: {}\n", groups.join(", ")));
                }
            }

            output.push('\n');
        }
    }

    if violations.has_errors() {
        output.push_str("RESULT: FAIL (errors found)\n");
    } else {
        output.push_str("RESULT: PASS WITH WARNINGS\n");
    }

    output
}

fn generate_json_report(violations: &ViolationSet) -> String {
    serde_json::to_string_pretty(violations).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize violations: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    #[serde(rename = "helpUri", skip_serializing_if = "Option::is_none")]
    help_uri: Option<String>,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
    region: Option<SarifRegion>,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
}

fn generate_sarif_report(violations: &ViolationSet) -> String {
    let results: Vec<SarifResult> = violations
        .iter()
        .map(|v| {
            let level = match v.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "note",
            };

            let locations = v
                .file
                .iter()
                .map(|file| SarifLocation {
                    physical_location: SarifPhysicalLocation {
                        artifact_location: SarifArtifactLocation {
                            uri: file.display().to_string(),
                        },
                        region: v.line.map(|l| SarifRegion { start_line: l }),
                    },
                })
                .collect();

            SarifResult {
                rule_id: v.rule_id.clone(),
                level: level.to_string(),
                message: SarifMessage { text: v.message.clone() },
                help_uri: v.link.clone(),
                locations,
            }
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "remediabot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::{Violation, WcagLevel};
    use std::path::PathBuf;

    fn sample_violation() -> Violation {
        Violation::new("img-alt", Severity::Error, "Images should include an alt attribute", 4)
            .with_rule_name("Alt text")
            .with_wcag("1.1.1", WcagLevel::A)
            .with_link("https://www.w3.org/TR/WCAG20-TECHS/H37.html")
            .with_file(PathBuf::from("index.html"))
            .with_line(Some(10))
    }

    #[test]
    fn test_text_report_empty() {
        let report = generate_report(&ViolationSet::new(), OutputFormat::Text);
        assert!(report.contains("No accessibility violations found"));
    }

    #[test]
    fn test_text_report_with_violations() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Text);
        assert!(report.contains("[img-alt] Alt text"));
        assert!(report.contains("Location: index.html:10"));
        assert!(report.contains("WCAG: 1.1.1 (Level A)"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn test_json_report() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["violations"][0]["ruleId"], "img-alt");
    }

    #[test]
    fn test_sarif_report() {
        let mut violations = ViolationSet::new();
        violations.add(sample_violation());
        let report = generate_report(&violations, OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let result = &parsed["runs"][0]["results"][0];
        assert_eq!(result["level"], "error");
        assert_eq!(result["helpUri"], "https://www.w3.org/TR/WCAG20-TECHS/H37.html");
        assert_eq!(
            result["locations"][0]["physicalLocation"]["region"]["startLine"],
            10
        );
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
