//! Candidate sections produced by the segmenter.

use serde::{Deserialize, Serialize};

/// A titled span of page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Best-effort title (first sentence or a positional label)
    pub title: String,

    /// Section body text
    pub text: String,
}

impl Section {
    /// Create a new section.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}
