// SPDX-License-Identifier: PMPL-1.0-or-later
//! Page language - WCAG 3.1.1 Language of Page (technique H57)
//!
//! The `<html>` element must declare a non-blank `lang` so assistive
//! technology picks the right pronunciation rules.

use super::{set_if_changed, FixOutcome, Rule, RuleContext};
use crate::element::Element;
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;
use crate::violation::{ImpactAssessment, Severity};
use regex::Regex;
use std::sync::OnceLock;

pub struct HtmlHasLangRule;

impl HtmlHasLangRule {
    pub const ID: &'static str = "html-has-lang";
}

/// BCP 47 shape: primary subtag of 2-3 letters, then alphanumeric subtags
fn language_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("valid regex"))
}

impl Rule for HtmlHasLangRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn link(&self) -> &'static str {
        "https://www.w3.org/TR/WCAG20-TECHS/H57.html"
    }

    fn criterion(&self) -> &'static str {
        "3.1.1"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn impact(&self) -> ImpactAssessment {
        ImpactAssessment::blind_and_cognitive()
    }

    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String> {
        if elem.tag_name() != "html" {
            return None;
        }
        match elem.get_attribute("lang") {
            Some(lang) if !lang.trim().is_empty() => None,
            _ => Some(self.message(ctx)),
        }
    }

    fn message(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "html_has_lang.message",
            "The page should declare its language with a lang attribute.",
        )
    }

    fn why(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "html_has_lang.why",
            "Screen readers choose pronunciation from the page language. Without it, content may be read with the wrong accent or voice, and translation tools cannot detect the source language.",
        )
    }

    fn display_name(&self, ctx: &RuleContext) -> String {
        ctx.t("html_has_lang.display_name", "Page language")
    }

    fn form(&self, elem: &dyn Element, ctx: &RuleContext) -> FormDescriptor {
        FormDescriptor::builder()
            .undo_text(ctx.t("html_has_lang.undo", "Language set"))
            .input(
                ctx.t("html_has_lang.input_label", "Language code"),
                Some(ctx.t(
                    "html_has_lang.input_description",
                    "A language tag such as en, fr or pt-BR.",
                )),
            )
            .max_length(35)
            .initial_value(elem.get_attribute("lang").unwrap_or(""))
            .build()
    }

    fn fix(&self, elem: &mut dyn Element, value: Option<&str>, ctx: &RuleContext) -> Result<FixOutcome> {
        let value = value.map(str::trim).unwrap_or("");
        if !language_tag_re().is_match(value) {
            return Err(RemediationError::validation(
                Self::ID,
                ctx.t_with(
                    "html_has_lang.invalid",
                    "\"%{value}\" is not a valid language code.",
                    &[("value", value)],
                ),
            ));
        }
        Ok(set_if_changed(elem, "lang", value))
    }
}
