// SPDX-License-Identifier: PMPL-1.0-or-later
//! Table header scope - WCAG 1.3.1 Info and Relationships (technique H63)

use super::{set_if_changed, FixOutcome, Rule, RuleContext};
use crate::element::Element;
use crate::error::{RemediationError, Result};
use crate::form::FormDescriptor;

/// Values a `th` scope may take
pub const VALID_SCOPES: &[&str] = &["row", "col", "rowgroup", "colgroup"];

pub struct TableHeaderScopeRule;

impl TableHeaderScopeRule {
    pub const ID: &'static str = "table-header-scope";
}

impl Rule for TableHeaderScopeRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn link(&self) -> &'static str {
        "https://www.w3.org/TR/WCAG20-TECHS/H63.html"
    }

    fn criterion(&self) -> &'static str {
        "1.3.1"
    }

    fn test(&self, elem: &dyn Element, ctx: &RuleContext) -> Option<String> {
        if elem.tag_name() != "th" {
            return None;
        }
        let valid = elem
            .get_attribute("scope")
            .map(|scope| VALID_SCOPES.contains(&scope.trim().to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        (!valid).then(|| self.message(ctx))
    }

    fn message(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "table_header_scope.message",
            "Table headers should specify scope.",
        )
    }

    fn why(&self, ctx: &RuleContext) -> String {
        ctx.t(
            "table_header_scope.why",
            "Screen readers use the header scope to announce which row or column a cell belongs to. Without it, navigating a table cell by cell loses context.",
        )
    }

    fn display_name(&self, ctx: &RuleContext) -> String {
        ctx.t("table_header_scope.display_name", "Table header scope")
    }

    fn form(&self, elem: &dyn Element, ctx: &RuleContext) -> FormDescriptor {
        FormDescriptor::builder()
            .undo_text(ctx.t("table_header_scope.undo", "Header scope set"))
            .input(ctx.t("table_header_scope.input_label", "Set header scope"), None)
            .options(VALID_SCOPES.iter().copied())
            .initial_value(elem.get_attribute("scope").unwrap_or(""))
            .build()
    }

    fn fix(&self, elem: &mut dyn Element, value: Option<&str>, ctx: &RuleContext) -> Result<FixOutcome> {
        let value = value.map(|v| v.trim().to_ascii_lowercase()).unwrap_or_default();
        if !VALID_SCOPES.contains(&value.as_str()) {
            return Err(RemediationError::validation(
                Self::ID,
                ctx.t_with(
                    "table_header_scope.invalid",
                    "Scope must be one of: %{options}.",
                    &[("options", VALID_SCOPES.join(", ").as_str())],
                ),
            ));
        }
        Ok(set_if_changed(elem, "scope", &value))
    }
}
