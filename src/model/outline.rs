//! Heading outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level inferred from glyph size.
///
/// Ordering follows rank: `H1 < H2 < H3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Map a size-cluster index (0 = largest glyphs) to a level.
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            0 => HeadingLevel::H1,
            1 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    /// Numeric depth (1-3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.depth())
    }
}

/// A single heading candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineItem {
    /// Heading level
    pub level: HeadingLevel,

    /// Heading text, trimmed
    pub text: String,

    /// Page number (1-indexed)
    pub page: u32,
}

impl OutlineItem {
    /// Create a new outline item.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Inferred document outline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfOutline {
    /// Document title
    pub title: String,

    /// Headings sorted by page
    pub outline: Vec<OutlineItem>,
}

impl PdfOutline {
    /// Create an outline with no headings.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outline: Vec::new(),
        }
    }

    /// Check if no headings were found.
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    /// Get the number of headings.
    pub fn len(&self) -> usize {
        self.outline.len()
    }

    /// Iterate over headings of one level.
    pub fn items_at(&self, level: HeadingLevel) -> impl Iterator<Item = &OutlineItem> {
        self.outline.iter().filter(move |item| item.level == level)
    }
}

/// Resolve a document title: the metadata title when present and non-empty,
/// otherwise the filename without its extension.
pub fn document_title(filename: &str, metadata_title: Option<&str>) -> String {
    if let Some(title) = metadata_title.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    std::path::Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}
