// SPDX-License-Identifier: PMPL-1.0-or-later
//! Alt text length - WCAG 1.1.1 (technique H45)
//!
//! Long descriptions belong in the surrounding content or a `longdesc`,
//! not in the alt attribute. The limit comes from `RuleContext::max_alt_length`.

use super::{generate_alt_text, mark_decorative, set_if_changed, FixOutcome, Rule, RuleContext};
use super::img_alt_filename::{is_src_filename, ImgAltFilenameRule};
use crate::element::Element;
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;

pub struct ImgAltLengthRule;

impl ImgAltLengthRule {
    pub const ID: &'static str = "img-alt-length";
}

impl Rule for ImgAltLengthRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn link(&self) -> &'static str {
        "https://www.w3.org/TR/WCAG20-TECHS/H45.html"
    }

    fn criterion(&self) -> &'static str {
        "1.1.1"
    }

    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String> {
        if elem.tag_name() != "img" {
            return None;
        }
        let alt = elem.get_attribute("alt")?;
        (alt.chars().count() > ctx.max_alt_length).then(|| self.message(ctx))
    }

    fn message(&self, ctx: &RuleContext) -> String {
        let limit = ctx.max_alt_length.to_string();
        ctx.t_with(
            "img_alt_length.message",
            "Alt attribute text should not contain more than %{count} characters.",
            &[("count", limit.as_str())],
        )
    }

    fn why(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "img_alt_length.why",
            "Screen readers read alt text in one pass and cannot skip ahead. Keep it short and move longer descriptions into the page content.",
        )
    }

    fn display_name(&self, ctx: &RuleContext) -> String {
        ctx.t("img_alt_length.display_name", "Alt text length")
    }

    fn form(&self, elem: &dyn Element, ctx: &RuleContext) -> FormDescriptor {
        FormDescriptor::builder()
            .checkbox(
                ctx.t("img_alt.decorative_label", "This image is decorative"),
                ctx.t(
                    "img_alt.decorative_subtext",
                    "Decorative images are ignored by screen readers.",
                ),
            )
            .undo_text(ctx.t("img_alt_length.undo", "Alt text shortened"))
            .input(ctx.t("img_alt.input_label", "Alt text"), None)
            .max_length(ctx.max_alt_length)
            .generate(ctx.t("img_alt.generate", "Generate alt text"))
            .initial_value(elem.get_attribute("alt").unwrap_or(""))
            .build()
    }

    fn generate_fix(&self, elem: &dyn Element, ctx: &RuleContext) -> Result<Option<String>> {
        generate_alt_text(elem, ctx)
    }

    fn fix(&self, elem: &mut dyn Element, value: Option<&str>, ctx: &RuleContext) -> Result<FixOutcome> {
        let value = value.map(str::trim).unwrap_or("");
        if value.is_empty() {
            return Ok(mark_decorative(elem));
        }
        if value.chars().count() > ctx.max_alt_length {
            return Err(RemediationError::validation(Self::ID, self.message(ctx)));
        }
        if is_src_filename(elem, value) {
            return Err(RemediationError::validation(Self::ID, ImgAltFilenameRule.message(ctx)));
        }
        Ok(set_if_changed(elem, "alt", value))
    }
}
