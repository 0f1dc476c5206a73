// SPDX-License-Identifier: PMPL-1.0-or-later
//! Violations produced by running rules over elements.
//!
//! A [`Violation`] pins one failing rule to one element by its index in the
//! scanned document. It is the handle the remediation flow uses later to
//! fetch the rule's form and apply a fix.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Severity levels for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Content is inaccessible to some users
    Error,
    /// Content is degraded for some users
    Warning,
    /// Informational
    Info,
}

impl Severity {
    /// Whether this severity should fail a check run
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Info => write!(f, "INFO"),
        }
    }
}

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// Who is affected by an accessibility issue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    /// Screen reader users
    pub blind: bool,
    pub low_vision: bool,
    pub cognitive: bool,
}

impl ImpactAssessment {
    pub fn blind() -> Self {
        Self { blind: true, ..Self::default() }
    }

    /// Screen reader users and users who rely on translation or reading aids
    pub fn blind_and_cognitive() -> Self {
        Self { blind: true, cognitive: true, ..Self::default() }
    }

    pub fn affected_groups(&self) -> Vec<&'static str> {
        let mut groups = Vec::new();
        if self.blind { groups.push("blind"); }
        if self.low_vision { groups.push("low-vision"); }
        if self.cognitive { groups.push("cognitive"); }
        groups
    }
}

/// One rule failing on one element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: Uuid,
    /// Identifier of the rule that flagged the element (e.g. "img-alt-filename")
    pub rule_id: String,
    /// Localized rule name
    pub rule_name: String,
    pub severity: Severity,
    /// Localized message returned by the rule's test
    pub message: String,
    /// Index of the element within its document
    pub element_index: usize,
    /// Opening tag of the offending element
    pub element: Option<String>,
    pub file: Option<PathBuf>,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    pub wcag_criterion: Option<String>,
    pub wcag_level: Option<WcagLevel>,
    /// Link to the WCAG technique
    pub link: Option<String>,
    pub impact: Option<ImpactAssessment>,
    pub created_at: DateTime<Utc>,
}

impl Violation {
    pub fn new(rule_id: &str, severity: Severity, message: &str, element_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            rule_id: rule_id.to_string(),
            rule_name: rule_id.to_string(),
            severity,
            message: message.to_string(),
            element_index,
            element: None,
            file: None,
            line: None,
            wcag_criterion: None,
            wcag_level: None,
            link: None,
            impact: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_wcag(mut self, criterion: &str, level: WcagLevel) -> Self {
        self.wcag_criterion = Some(criterion.to_string());
        self.wcag_level = Some(level);
        self
    }

    pub fn with_rule_name(mut self, name: &str) -> Self {
        self.rule_name = name.to_string();
        self
    }

    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn with_element(mut self, element: &str) -> Self {
        self.element = Some(element.to_string());
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(link.to_string());
        self
    }

    pub fn with_impact(mut self, impact: ImpactAssessment) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, self.line) {
            (Some(f), Some(l)) => format!("{}:{}", f.display(), l),
            (Some(f), None) => f.display().to_string(),
            (None, Some(l)) => format!("line {}", l),
            (None, None) => format!("element #{}", self.element_index),
        }
    }
}

/// A collection of violations with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViolationSet {
    pub violations: Vec<Violation>,
}

impl ViolationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    pub fn by_severity(&self, severity: Severity) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.severity == severity).collect()
    }

    pub fn by_rule(&self, rule_id: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule_id == rule_id).collect()
    }

    /// Violations flagged on a single element
    pub fn for_element(&self, element_index: usize) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.element_index == element_index)
            .collect()
    }

    pub fn errors(&self) -> Vec<&Violation> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<&Violation> {
        self.by_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity.is_blocking())
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ViolationSet {
        let mut set = ViolationSet::new();
        set.add(Violation::new("img-alt", Severity::Error, "Missing alt", 3));
        set.add(Violation::new("img-alt-filename", Severity::Warning, "Filename", 4));
        set.add(Violation::new("img-alt-length", Severity::Warning, "Too long", 4));
        set
    }

    #[test]
    fn test_aggregation() {
        let set = sample();
        assert_eq!(set.len(), 3);
        assert!(set.has_errors());
        assert_eq!(set.errors().len(), 1);
        assert_eq!(set.warnings().len(), 2);
        assert_eq!(set.for_element(4).len(), 2);
        assert_eq!(set.by_rule("img-alt").len(), 1);
    }

    #[test]
    fn test_location_string() {
        let v = Violation::new("img-alt", Severity::Error, "Missing alt", 7);
        assert_eq!(v.location_string(), "element #7");

        let v = v.with_file(PathBuf::from("index.html")).with_line(Some(12));
        assert_eq!(v.location_string(), "index.html:12");
    }

    #[test]
    fn test_serializes_for_ui() {
        let v = Violation::new("img-alt", Severity::Error, "Missing alt", 2)
            .with_wcag("1.1.1", WcagLevel::A)
            .with_impact(ImpactAssessment::blind());
        let json = serde_json::to_value(&v).expect("serializable");

        assert_eq!(json["ruleId"], "img-alt");
        assert_eq!(json["severity"], "error");
        assert_eq!(json["elementIndex"], 2);
        assert_eq!(json["wcagLevel"], "A");
        assert_eq!(json["impact"]["blind"], true);
    }

    #[test]
    fn test_impact_groups() {
        assert_eq!(ImpactAssessment::blind().affected_groups(), vec!["blind"]);
        assert_eq!(
            ImpactAssessment::blind_and_cognitive().affected_groups(),
            vec!["blind", "cognitive"]
        );
    }
}
