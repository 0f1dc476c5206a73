// SPDX-License-Identifier: PMPL-1.0-or-later
//! Localization collaborator for rule text.
//!
//! Rules never format user-facing strings themselves; they ask a
//! [`Translator`] for a key with an English default. Placeholders use the
//! `%{name}` form.

use crate::error::{RemediationError, Result};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Resolves user-facing strings for the active locale
pub trait Translator: Send + Sync {
    /// Look up `key`, falling back to `default`, then substitute placeholders
    fn translate(&self, key: &str, default: &str, substitutions: &[(&str, &str)]) -> String;
}

/// Returns the English defaults unchanged apart from interpolation
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, _key: &str, default: &str, substitutions: &[(&str, &str)]) -> String {
        interpolate(default, substitutions)
    }
}

/// Translations for a single locale
///
/// # Example
/// ```
/// use remediabot::i18n::{MessageCatalog, Translator};
///
/// let mut catalog = MessageCatalog::new("fr");
/// catalog.add_translation("img_alt.display_name", "Texte alternatif");
///
/// assert_eq!(catalog.translate("img_alt.display_name", "Alt text", &[]), "Texte alternatif");
/// assert_eq!(catalog.translate("missing", "Fallback", &[]), "Fallback");
/// ```
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            messages: HashMap::new(),
        }
    }

    /// Load a catalog from a JSON file of the form
    /// `{"locale": "fr", "messages": {"key": "translation"}}`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        #[derive(serde::Deserialize)]
        struct CatalogFile {
            locale: String,
            #[serde(default)]
            messages: HashMap<String, String>,
        }

        let file: CatalogFile = serde_json::from_str(content)?;
        if file.locale.trim().is_empty() {
            return Err(RemediationError::Config(
                "message catalog has an empty locale".to_string(),
            ));
        }
        Ok(Self {
            locale: file.locale,
            messages: file.messages,
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn add_translation(&mut self, key: impl Into<String>, translation: impl Into<String>) {
        self.messages.insert(key.into(), translation.into());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.messages.get(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str, default: &str, substitutions: &[(&str, &str)]) -> String {
        let template = self.get(key).map(String::as_str).unwrap_or(default);
        interpolate(template, substitutions)
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%\{(\w+)\}").expect("valid regex"))
}

/// Replace every `%{name}` placeholder with its substitution.
/// Unknown placeholders are left as-is, and substituted values are never
/// scanned for placeholders themselves.
pub fn interpolate(template: &str, substitutions: &[(&str, &str)]) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| {
            substitutions
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
