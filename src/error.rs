// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for remediabot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemediationError>;

#[derive(Error, Debug)]
pub enum RemediationError {
    /// A proposed fix value would reintroduce the violation, or is malformed.
    /// The message is the rule's own and is meant to be shown to the user as-is.
    #[error("{message}")]
    Validation { rule_id: String, message: String },

    #[error("Unknown rule: {0}")]
    UnknownRule(String),

    #[error("No element at index {0}")]
    ElementNotFound(usize),

    #[error("Alt text generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemediationError {
    pub fn validation(rule_id: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            rule_id: rule_id.to_string(),
            message: message.into(),
        }
    }

    /// Whether this error should be shown inline next to the fix input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
