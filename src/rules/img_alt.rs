// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text presence - WCAG 1.1.1 Non-text Content (technique H37)
//!
//! Every `<img>` needs an `alt` attribute. An empty alt is only acceptable
//! on an image explicitly marked `role="presentation"`.

use super::{generate_alt_text, is_presentational, mark_decorative, set_if_changed, FixOutcome, Rule, RuleContext};
use super::img_alt_filename::{is_src_filename, ImgAltFilenameRule};
use crate::element::Element;
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;
use crate::violation::Severity;

pub struct ImgAltRule;

impl ImgAltRule {
    pub const ID: &'static str = "img-alt";
}

impl Rule for ImgAltRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn link(&self) -> &'static str {
        "https://www.w3.org/TR/WCAG20-TECHS/H37.html"
    }

    fn criterion(&self) -> &'static str {
        "1.1.1"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String> {
        if elem.tag_name() != "img" {
            return None;
        }
        match elem.get_attribute("alt") {
            None => Some(self.message(ctx)),
            Some(alt) if alt.trim().is_empty() && !is_presentational(elem) => Some(self.message(ctx)),
            Some(_) => None,
        }
    }

    fn message(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "img_alt.message",
            "Images should include an alt attribute describing the image content.",
        )
    }

    fn why(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "img_alt.why",
            "Screen readers cannot determine what is displayed in an image without alternative text. Decorative images should be marked so screen readers skip them.",
        )
    }

    fn display_name(&self, ctx: &RuleContext) -> String {
        ctx.t("img_alt.display_name", "Alt text")
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
            .undo_text(ctx.t("img_alt.undo", "Alt text added"))
            .input(
                ctx.t("img_alt.input_label", "Alt text"),
                Some(ctx.t(
                    "img_alt.input_description",
                    "Describe what the image shows and why it matters to the content.",
                )),
            )
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
            let limit = ctx.max_alt_length.to_string();
            return Err(RemediationError::validation(
                Self::ID,
                ctx.t_with(
                    "img_alt.too_long",
                    "Alt text should be %{count} characters or fewer.",
                    &[("count", limit.as_str())],
                ),
            ));
        }
        if is_src_filename(elem, value) {
            return Err(RemediationError::validation(Self::ID, ImgAltFilenameRule.message(ctx)));
        }
        Ok(set_if_changed(elem, "alt", value))
    }
}
