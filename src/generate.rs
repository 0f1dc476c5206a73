// SPDX-License-Identifier: PMPL-1.0-or-later
//! Alt text generation collaborator.
//!
//! The engine only defines the call shape; an image-captioning service or
//! any other backend plugs in by implementing [`AltTextGenerator`].
//! Timeouts and retries belong to the implementation.

use crate::error::Result;

/// Suggests alternative text for an image
pub trait AltTextGenerator: Send + Sync {
    /// Produce alt text for the image at `image_src`
    fn generate_alt_text(&self, image_src: &str) -> Result<String>;
}
