// SPDX-License-Identifier: PMPL-1.0-or-later
//! Alt text must not be the image filename - WCAG 1.1.1 (technique F30)
//!
//! Flags `<img>` elements whose alt text looks like a copied filename
//! (`IMG_0042.jpg`, `vacation_2024.png`). A missing or blank alt is not this
//! rule's concern; [`super::img_alt::ImgAltRule`] reports that.
//!
//! The fix refuses a value equal to the image's own filename, with or
//! without its extension.

use super::{generate_alt_text, is_presentational, set_if_changed, FixOutcome, Rule, RuleContext};
use crate::element::Element;
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;

pub struct ImgAltFilenameRule;

impl ImgAltFilenameRule {
    pub const ID: &'static str = "img-alt-filename";
}

impl Rule for ImgAltFilenameRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn link(&self) -> &'static str {
        "https://www.w3.org/TR/WCAG20-TECHS/F30.html"
    }

    fn criterion(&self) -> &'static str {
        "1.1.1"
    }

    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String> {
        if elem.tag_name() != "img" {
            return None;
        }
        let alt = elem.get_attribute("alt")?;

        if alt.is_empty() && is_presentational(elem) {
            return None;
        }
        if alt.trim().is_empty() {
            return None;
        }

        filename_like(alt).then(|| self.message(ctx))
    }

    fn message(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "img_alt_filename.message",
            "Image filenames should not be used as the alt attribute describing the image content.",
        )
    }

    fn why(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "img_alt_filename.why",
            "Screen readers announce the alt text in place of the image. A filename is usually a meaningless string of letters and numbers that says nothing about what the image shows or why it is there.",
        )
    }

    fn display_name(&self, ctx: &RuleContext) -> String {
        ctx.t("img_alt_filename.display_name", "Alt text filename")
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
            .undo_text(ctx.t("img_alt_filename.undo", "Alt text updated"))
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
        let value = value.unwrap_or("");
        if value.is_empty() {
            // Marks the image decorative; a stale alt is left in place.
            return Ok(set_if_changed(elem, "role", "presentation"));
        }

        if is_src_filename(elem, value) {
            return Err(RemediationError::validation(Self::ID, self.message(ctx)));
        }

        Ok(set_if_changed(elem, "alt", value))
    }
}

/// Whether `text` has the shape of a filename: no whitespace before the
/// first dot, and a word-character extension after the last one.
pub fn filename_like(text: &str) -> bool {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() < 2 {
        return false;
    }
    let (first, last) = (parts[0], parts[parts.len() - 1]);
    if last.is_empty() {
        return false;
    }
    !first.chars().any(|c| c.is_ascii_whitespace())
        && last.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `value` is the element's own `src` filename, with or without
/// its extension
pub(crate) fn is_src_filename(elem: &dyn Element, value: &str) -> bool {
    let (filename, stem) = src_filename(elem.get_attribute("src").unwrap_or(""));
    !filename.is_empty() && (value == filename || value == stem)
}

/// Split an image `src` into its filename and the filename before its first dot
fn src_filename(src: &str) -> (&str, &str) {
    let last_segment = src.rsplit('/').next().unwrap_or("");
    let filename = last_segment.split('?').next().unwrap_or("");
    let stem = filename.split('.').next().unwrap_or("");
    (filename, stem)
}
