// SPDX-License-Identifier: PMPL-1.0-or-later
//! Remediabot - accessibility rule evaluation and remediation engine
//!
//! Runs a pluggable set of WCAG rules over HTML elements, reports
//! violations, describes the input each fix needs, and applies
//! user-approved fixes back onto the element.
//!
//! ## Rules
//!
//! - **img-alt** (1.1.1): Images must have alt text or be marked decorative
//! - **img-alt-filename** (1.1.1): Alt text must not be the image filename
//! - **img-alt-length** (1.1.1): Alt text must stay short
//! - **table-header-scope** (1.3.1): Table headers must declare their scope
//! - **html-has-lang** (3.1.1): The page must declare its language
//!
//! ## Example
//!
//! ```
//! use remediabot::element::Document;
//! use remediabot::runner::RuleRunner;
//!
//! let mut doc = Document::parse(
//!     r#"<html lang="en"><body><img src="/img/cat.png" alt="cat.png"></body></html>"#,
//! );
//! let runner = RuleRunner::default();
//! let violations = runner.check_document(&doc, None);
//! assert_eq!(violations.len(), 1);
//!
//! let violation = &violations.violations[0];
//! assert!(runner.apply_fix_in(&mut doc, violation, Some("cat")).is_err());
//! runner
//!     .apply_fix_in(&mut doc, violation, Some("A cat asleep on a windowsill"))
//!     .expect("descriptive alt text is accepted");
//! assert!(runner.check_document(&doc, None).is_empty());
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod form;
pub mod generate;
pub mod i18n;
pub mod report;
pub mod rules;
pub mod runner;
pub mod scanner;
pub mod violation;
