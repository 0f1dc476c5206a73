// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule registry and runner.
//!
//! [`RuleRunner`] owns the rule set and the injected [`RuleContext`]. It
//! runs every rule's `test` over a document's elements and, for each
//! resulting [`Violation`], dispatches form, generation and fix requests
//! back to the rule that raised it. A fix is only reachable through a
//! violation, so a rule is never asked to fix an element it did not flag.

use crate::config::EngineConfig;
use crate::element::{Document, Element};
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;
use crate::rules::{default_rules, FixOutcome, Rule, RuleContext};
use crate::violation::{Violation, ViolationSet};
use std::path::Path;
use tracing::{debug, info};

pub struct RuleRunner {
    rules: Vec<Box<dyn Rule>>,
    ctx: RuleContext,
}

impl RuleRunner {
    /// Runner with the built-in rule set
    pub fn new(ctx: RuleContext) -> Self {
        Self::with_rules(default_rules(), ctx)
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>, ctx: RuleContext) -> Self {
        Self { rules, ctx }
    }

    /// Built-in rules filtered by the configured level and disabled list.
    /// The configured alt text limit overrides the context's.
    pub fn from_config(config: &EngineConfig, ctx: RuleContext) -> Self {
        let rules = default_rules()
            .into_iter()
            .filter(|rule| rule.level() <= config.level && config.is_rule_enabled(rule.id()))
            .collect();
        Self::with_rules(rules, ctx.with_max_alt_length(config.max_alt_length))
    }

    /// Add a rule. Rules registered later run later.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn rule(&self, id: &str) -> Option<&dyn Rule> {
        self.rules().find(|r| r.id() == id)
    }

    pub fn context(&self) -> &RuleContext {
        &self.ctx
    }

    /// Run every rule against one element
    pub fn check_element(&self, index: usize, elem: &dyn Element) -> Vec<Violation> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let message = rule.test(elem, &self.ctx)?;
                debug!("{} flagged <{}> #{}", rule.id(), elem.tag_name(), index);
                Some(self.violation(rule.as_ref(), &message, index))
            })
            .collect()
    }

    /// Run every rule against every element, indexing violations by position
    pub fn check<E: Element>(&self, elements: &[E]) -> ViolationSet {
        let mut violations = ViolationSet::new();
        for (index, elem) in elements.iter().enumerate() {
            violations.extend(self.check_element(index, elem));
        }
        violations
    }

    /// Check a parsed document, attaching file, line and element snippet
    pub fn check_document(&self, doc: &Document, file: Option<&Path>) -> ViolationSet {
        let mut violations = ViolationSet::new();
        for (index, elem) in doc.elements().iter().enumerate() {
            for violation in self.check_element(index, elem) {
                let violation = violation
                    .with_line(elem.line())
                    .with_element(&elem.open_tag());
                violations.add(match file {
                    Some(path) => violation.with_file(path.to_path_buf()),
                    None => violation,
                });
            }
        }
        info!(
            "Checked {} elements against {} rules, found {} violations",
            doc.len(),
            self.rules.len(),
            violations.len()
        );
        violations
    }

    /// Remediation form for a violation
    pub fn form(&self, violation: &Violation, elem: &dyn Element) -> Result<FormDescriptor> {
        Ok(self.rule_for(violation)?.form(elem, &self.ctx))
    }

    /// Suggested fix value for a violation, if its rule can generate one
    pub fn generate_fix(&self, violation: &Violation, elem: &dyn Element) -> Result<Option<String>> {
        self.rule_for(violation)?.generate_fix(elem, &self.ctx)
    }

    /// Apply a user-submitted value. Validation errors are returned as-is so
    /// the caller can show them next to the input.
    pub fn apply_fix(
        &self,
        violation: &Violation,
        elem: &mut dyn Element,
        value: Option<&str>,
    ) -> Result<FixOutcome> {
        let rule = self.rule_for(violation)?;
        let outcome = rule.fix(elem, value, &self.ctx)?;
        debug!(
            "{} fix on element #{}: {:?}",
            rule.id(),
            violation.element_index,
            outcome
        );
        Ok(outcome)
    }

    /// Apply a fix to the flagged element inside its document
    pub fn apply_fix_in(
        &self,
        doc: &mut Document,
        violation: &Violation,
        value: Option<&str>,
    ) -> Result<FixOutcome> {
        let elem = doc
            .get_mut(violation.element_index)
            .ok_or(RemediationError::ElementNotFound(violation.element_index))?;
        self.apply_fix(violation, elem, value)
    }

    fn rule_for(&self, violation: &Violation) -> Result<&dyn Rule> {
        self.rule(&violation.rule_id)
            .ok_or_else(|| RemediationError::UnknownRule(violation.rule_id.clone()))
    }

    fn violation(&self, rule: &dyn Rule, message: &str, index: usize) -> Violation {
        Violation::new(rule.id(), rule.severity(), message, index)
            .with_rule_name(&rule.display_name(&self.ctx))
            .with_wcag(rule.criterion(), rule.level())
            .with_link(rule.link())
            .with_impact(rule.impact())
    }
}

impl Default for RuleRunner {
    fn default() -> Self {
        Self::new(RuleContext::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::HtmlElement;
    use crate::generate::AltTextGenerator;
    use crate::rules::img_alt_filename::ImgAltFilenameRule;
    use crate::violation::{Severity, WcagLevel};
    use std::sync::Arc;

    struct FixedCaption;

    impl AltTextGenerator for FixedCaption {
        fn generate_alt_text(&self, image_src: &str) -> Result<String> {
            Ok(format!("Caption for {}", image_src))
        }
    }

    struct FailingCaption;

    impl AltTextGenerator for FailingCaption {
        fn generate_alt_text(&self, _image_src: &str) -> Result<String> {
            Err(RemediationError::Generation("service unavailable".to_string()))
        }
    }

    fn filename_img() -> HtmlElement {
        HtmlElement::new("img")
            .with_attribute("src", "/path/photo.jpg")
            .with_attribute("alt", "photo.jpg")
    }

    #[test]
    fn test_check_collects_violations() {
        let runner = RuleRunner::default();
        let elements = vec![
            HtmlElement::new("p"),
            filename_img(),
            HtmlElement::new("img").with_attribute("src", "a.png"),
        ];

        let violations = runner.check(&elements);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations.for_element(1)[0].rule_id, "img-alt-filename");
        assert_eq!(violations.for_element(2)[0].rule_id, "img-alt");
        assert_eq!(violations.for_element(2)[0].severity, Severity::Error);
        assert_eq!(violations.for_element(1)[0].rule_name, "Alt text filename");
        assert_eq!(violations.for_element(1)[0].wcag_level, Some(WcagLevel::A));
    }

    #[test]
    fn test_fix_through_violation() {
        let runner = RuleRunner::default();
        let mut elements = vec![filename_img()];
        let violations = runner.check(&elements);
        let violation = &violations.violations[0];

        let err = runner
            .apply_fix(violation, &mut elements[0], Some("photo"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), ImgAltFilenameRule.message(runner.context()));

        let outcome = runner
            .apply_fix(violation, &mut elements[0], Some("A cat on a windowsill"))
            .expect("valid fix");
        assert_eq!(outcome, FixOutcome::Applied);
        assert!(runner.check(&elements).is_empty());
    }

    #[test]
    fn test_form_and_generation() {
        let ctx = RuleContext::default().with_generator(Arc::new(FixedCaption));
        let runner = RuleRunner::new(ctx);
        let elem = filename_img();
        let violations = runner.check(std::slice::from_ref(&elem));
        let violation = &violations.violations[0];

        let form = runner.form(violation, &elem).expect("known rule");
        assert_eq!(form.initial_value, "photo.jpg");
        assert_eq!(
            runner.generate_fix(violation, &elem).expect("generated"),
            Some("Caption for /path/photo.jpg".to_string())
        );
    }

    #[test]
    fn test_generation_failure_propagates() {
        let ctx = RuleContext::default().with_generator(Arc::new(FailingCaption));
        let runner = RuleRunner::new(ctx);
        let elem = filename_img();
        let violations = runner.check(std::slice::from_ref(&elem));

        let err = runner
            .generate_fix(&violations.violations[0], &elem)
            .unwrap_err();
        assert!(matches!(err, RemediationError::Generation(_)));
    }

    #[test]
    fn test_generation_needs_src() {
        let ctx = RuleContext::default().with_generator(Arc::new(FixedCaption));
        let runner = RuleRunner::new(ctx);
        let elem = HtmlElement::new("img");
        let violations = runner.check(std::slice::from_ref(&elem));

        assert_eq!(
            runner.generate_fix(&violations.violations[0], &elem).expect("ok"),
            None
        );
    }

    #[test]
    fn test_unknown_rule() {
        let runner = RuleRunner::with_rules(Vec::new(), RuleContext::default());
        let violation = Violation::new("img-alt", Severity::Error, "Missing alt", 0);
        let mut elem = HtmlElement::new("img");

        let err = runner.apply_fix(&violation, &mut elem, Some("x")).unwrap_err();
        assert!(matches!(err, RemediationError::UnknownRule(id) if id == "img-alt"));
    }

    #[test]
    fn test_from_config_filters_rules() {
        let config = EngineConfig {
            disabled_rules: vec!["img-alt".to_string()],
            max_alt_length: 50,
            ..EngineConfig::default()
        };
        let runner = RuleRunner::from_config(&config, RuleContext::default());

        assert!(runner.rule("img-alt").is_none());
        assert!(runner.rule("img-alt-filename").is_some());
        assert_eq!(runner.context().max_alt_length, 50);
    }

    #[test]
    fn test_register_custom_rule() {
        let mut runner = RuleRunner::with_rules(Vec::new(), RuleContext::default());
        assert!(runner.check(&[filename_img()]).is_empty());

        runner.register(Box::new(ImgAltFilenameRule));
        assert_eq!(runner.check(&[filename_img()]).len(), 1);
    }

    #[test]
    fn test_check_document_and_fix_in_place() {
        let runner = RuleRunner::default();
        let html = "<html lang=\"en\">\n<body>\n<img src=\"vacation_2024.png\" alt=\"vacation_2024.png\">\n</body>\n</html>";
        let mut doc = Document::parse(html);

        let violations = runner.check_document(&doc, Some(Path::new("page.html")));
        assert_eq!(violations.len(), 1);
        let violation = violations.violations[0].clone();
        assert_eq!(violation.line, Some(3));
        assert_eq!(violation.location_string(), "page.html:3");
        assert_eq!(
            violation.element.as_deref(),
            Some("<img alt=\"vacation_2024.png\" src=\"vacation_2024.png\">")
        );

        let outcome = runner
            .apply_fix_in(&mut doc, &violation, Some("Beach at sunset"))
            .expect("valid fix");
        assert_eq!(outcome, FixOutcome::Applied);
        assert!(runner.check_document(&doc, None).is_empty());
    }
}
