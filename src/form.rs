// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediation form descriptors.
//!
//! A [`FormDescriptor`] tells the UI layer which controls to render for a
//! violation: an optional "mark decorative" checkbox, a text input with its
//! limits, and whether a suggested value can be generated. It carries no
//! rendering logic.

use serde::{Deserialize, Serialize};

/// Declarative description of a rule's remediation input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    pub checkbox_label: Option<String>,
    pub checkbox_subtext: Option<String>,
    pub undo_text: Option<String>,
    pub input_label: Option<String>,
    pub input_description: Option<String>,
    pub input_max_length: Option<usize>,
    pub can_generate_fix: bool,
    pub generate_button_label: Option<String>,
    pub initial_value: String,
    /// Allowed values when the fix is a closed choice
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FormDescriptor {
    pub fn builder() -> FormDescriptorBuilder {
        FormDescriptorBuilder::default()
    }
}

/// Builder for [`FormDescriptor`]
#[derive(Debug, Default)]
pub struct FormDescriptorBuilder {
    form: FormDescriptor,
}

impl FormDescriptorBuilder {
    pub fn checkbox(mut self, label: String, subtext: String) -> Self {
        self.form.checkbox_label = Some(label);
        self.form.checkbox_subtext = Some(subtext);
        self
    }

    pub fn undo_text(mut self, text: String) -> Self {
        self.form.undo_text = Some(text);
        self
    }

    pub fn input(mut self, label: String, description: Option<String>) -> Self {
        self.form.input_label = Some(label);
        self.form.input_description = description;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.form.input_max_length = Some(max);
        self
    }

    /// Offer a "generate" button with the given label
    pub fn generate(mut self, button_label: String) -> Self {
        self.form.can_generate_fix = true;
        self.form.generate_button_label = Some(button_label);
        self
    }

    pub fn initial_value(mut self, value: &str) -> Self {
        self.form.initial_value = value.to_string();
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.form.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> FormDescriptor {
        self.form
    }
}
