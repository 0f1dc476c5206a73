// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility rules.
//!
//! Each rule covers one WCAG technique. A rule is stateless: `test` inspects
//! an element and returns a localized message when it fails, `form`
//! describes the remediation input, and `fix` applies a user-approved value.
//! Collaborators (translation, alt text generation) arrive through
//! [`RuleContext`] rather than globals.
//!
//! Every `test` must return `None` for elements the rule does not apply to;
//! rules never fail on inapplicable input.

pub mod html_has_lang;
pub mod img_alt;
pub mod img_alt_filename;
pub mod img_alt_length;
pub mod table_header_scope;

use crate::element::Element;
use crate::error::Result;
use crate::form::FormDescriptor;
use crate::generate::AltTextGenerator;
use crate::i18n::{PassthroughTranslator, Translator};
use crate::violation::{ImpactAssessment, Severity, WcagLevel};
use std::sync::Arc;

/// Default maximum alt text length, in characters
pub const DEFAULT_MAX_ALT_LENGTH: usize = 120;

/// Result of applying a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOutcome {
    /// The element was mutated
    Applied,
    /// The element already had the requested value; nothing to persist
    Unchanged,
}

/// Collaborators and settings shared by all rules
#[derive(Clone)]
pub struct RuleContext {
    pub translator: Arc<dyn Translator>,
    pub generator: Option<Arc<dyn AltTextGenerator>>,
    pub max_alt_length: usize,
}

impl RuleContext {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            generator: None,
            max_alt_length: DEFAULT_MAX_ALT_LENGTH,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn AltTextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_max_alt_length(mut self, max: usize) -> Self {
        self.max_alt_length = max;
        self
    }

    /// Shorthand for `translator.translate`
    pub fn t(&self, key: &str, default: &str) -> String {
        self.translator.translate(key, default, &[])
    }

    pub fn t_with(&self, key: &str, default: &str, substitutions: &[(&str, &str)]) -> String {
        self.translator.translate(key, default, substitutions)
    }
}

impl Default for RuleContext {
    fn default() -> Self {
        Self::new(Arc::new(PassthroughTranslator))
    }
}

impl std::fmt::Debug for RuleContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleContext")
            .field("generator", &self.generator.is_some())
            .field("max_alt_length", &self.max_alt_length)
            .finish_non_exhaustive()
    }
}

/// Trait implemented by all rules
pub trait Rule: Send + Sync {
    /// Stable identifier, e.g. "img-alt-filename"
    fn id(&self) -> &'static str;

    /// Link to the WCAG technique this rule enforces
    fn link(&self) -> &'static str;

    /// WCAG success criterion, e.g. "1.1.1"
    fn criterion(&self) -> &'static str;

    fn level(&self) -> WcagLevel {
        WcagLevel::A
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn impact(&self) -> ImpactAssessment {
        ImpactAssessment::blind()
    }

    /// Return a message if `elem` violates this rule, `None` otherwise.
    /// Pure: depends only on the element's current state.
    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String>;

    fn message(&self, ctx: &RuleContext) -> String;

    /// Why the rule matters, for the explanation panel
    fn why(&self, ctx: &RuleContext) -> String;

    fn display_name(&self, ctx: &RuleContext) -> String;

    /// Describe the remediation input for `elem`
    fn form(&self, elem: &dyn Element, ctx: &RuleContext) -> FormDescriptor;

    /// Suggest a fix value, if the rule supports generation
    fn generate_fix(&self, _elem: &dyn Element, _ctx: &RuleContext) -> Result<Option<String>> {
        Ok(None)
    }

    /// Apply a user-approved value. `None` or an empty value means the user
    /// ticked the rule's checkbox (e.g. "decorative image").
    fn fix(&self, elem: &mut dyn Element, value: Option<&str>, ctx: &RuleContext) -> Result<FixOutcome>;
}

/// The built-in rule set
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(img_alt::ImgAltRule),
        Box::new(img_alt_filename::ImgAltFilenameRule),
        Box::new(img_alt_length::ImgAltLengthRule),
        Box::new(table_header_scope::TableHeaderScopeRule),
        Box::new(html_has_lang::HtmlHasLangRule),
    ]
}

/// `role="presentation"` marks an element as decorative
pub(crate) fn is_presentational(elem: &dyn Element) -> bool {
    elem.get_attribute("role") == Some("presentation")
}

/// Set `name` to `value`, reporting whether anything changed
pub(crate) fn set_if_changed(elem: &mut dyn Element, name: &str, value: &str) -> FixOutcome {
    if elem.get_attribute(name) == Some(value) {
        return FixOutcome::Unchanged;
    }
    elem.set_attribute(name, value);
    FixOutcome::Applied
}

/// Mark an image decorative with an empty alt
pub(crate) fn mark_decorative(elem: &mut dyn Element) -> FixOutcome {
    let alt = set_if_changed(elem, "alt", "");
    let role = set_if_changed(elem, "role", "presentation");
    if alt == FixOutcome::Applied || role == FixOutcome::Applied {
        FixOutcome::Applied
    } else {
        FixOutcome::Unchanged
    }
}

/// Ask the configured generator for alt text for an image's `src`
pub(crate) fn generate_alt_text(elem: &dyn Element, ctx: &RuleContext) -> Result<Option<String>> {
    if elem.tag_name() != "img" {
        return Ok(None);
    }
    let Some(src) = elem.get_attribute("src") else {
        return Ok(None);
    };
    match &ctx.generator {
        Some(generator) => {
            tracing::debug!("Generating alt text for {}", src);
            generator.generate_alt_text(src).map(Some)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::HtmlElement;
    use std::collections::HashSet;

    #[test]
    fn test_rule_ids_are_unique() {
        let rules = default_rules();
        let ids: HashSet<&str> = rules.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), rules.len());
    }

    #[test]
    fn test_rules_ignore_unrelated_elements() {
        let ctx = RuleContext::default();
        let elem = HtmlElement::new("span").with_attribute("alt", "photo.jpg");
        for rule in default_rules() {
            assert!(rule.test(&elem, &ctx).is_none(), "{} flagged a <span>", rule.id());
        }
    }

    #[test]
    fn test_mark_decorative_is_idempotent() {
        let mut elem = HtmlElement::new("img").with_attribute("src", "line.png");
        assert_eq!(mark_decorative(&mut elem), FixOutcome::Applied);
        assert_eq!(mark_decorative(&mut elem), FixOutcome::Unchanged);
        assert_eq!(elem.get_attribute("alt"), Some(""));
        assert_eq!(elem.get_attribute("role"), Some("presentation"));
    }

    fn rejection(rule: &dyn Rule, mut elem: HtmlElement, value: &str, ctx: &RuleContext) -> (String, String) {
        match rule.fix(&mut elem, Some(value), ctx) {
            Err(crate::error::RemediationError::Validation { rule_id, message }) => (rule_id, message),
            other => panic!("{} accepted {:?}: {:?}", rule.id(), value, other),
        }
    }

    #[test]
    fn test_validation_errors_name_the_rejecting_rule() {
        use crate::rules::html_has_lang::HtmlHasLangRule;
        use crate::rules::img_alt::ImgAltRule;
        use crate::rules::img_alt_filename::ImgAltFilenameRule;
        use crate::rules::img_alt_length::ImgAltLengthRule;
        use crate::rules::table_header_scope::TableHeaderScopeRule;

        let ctx = RuleContext::default().with_max_alt_length(20);
        let img = || HtmlElement::new("img").with_attribute("src", "/files/cat.png");
        let long = "a".repeat(21);
        let filename_message = ImgAltFilenameRule.message(&ctx);

        // A filename is refused with the filename message by every image rule
        assert_eq!(
            rejection(&ImgAltFilenameRule, img(), "cat.png", &ctx),
            (ImgAltFilenameRule::ID.to_string(), filename_message.clone())
        );
        assert_eq!(
            rejection(&ImgAltRule, img(), "cat", &ctx),
            (ImgAltRule::ID.to_string(), filename_message.clone())
        );
        assert_eq!(
            rejection(&ImgAltLengthRule, img(), "cat.png", &ctx),
            (ImgAltLengthRule::ID.to_string(), filename_message)
        );

        assert_eq!(
            rejection(&ImgAltLengthRule, img(), &long, &ctx),
            (ImgAltLengthRule::ID.to_string(), ImgAltLengthRule.message(&ctx))
        );
        assert_eq!(
            rejection(&ImgAltRule, img(), &long, &ctx).1,
            "Alt text should be 20 characters or fewer."
        );
        assert_eq!(
            rejection(&TableHeaderScopeRule, HtmlElement::new("th"), "column", &ctx).1,
            "Scope must be one of: row, col, rowgroup, colgroup."
        );
        assert_eq!(
            rejection(&HtmlHasLangRule, HtmlElement::new("html"), "english", &ctx),
            (
                HtmlHasLangRule::ID.to_string(),
                "\"english\" is not a valid language code.".to_string()
            )
        );
    }

    #[test]
    fn test_generate_without_generator() {
        let ctx = RuleContext::default();
        let elem = HtmlElement::new("img").with_attribute("src", "cat.png");
        assert_eq!(generate_alt_text(&elem, &ctx).expect("no error"), None);
    }
}
