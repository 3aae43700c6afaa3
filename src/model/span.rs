//! Text spans as reported by a PDF decoder.

use serde::{Deserialize, Serialize};

/// One glyph run reported by the decoder.
///
/// `height` is the rendered glyph height and stands in for the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content, untrimmed
    pub text: String,

    /// Rendered glyph height in points
    pub height: f32,

    /// Page number (1-indexed)
    pub page: u32,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, height: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            height,
            page,
        }
    }

    /// Check if the span carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Height rounded to the nearest whole point, or `None` for unusable heights.
    pub fn rounded_height(&self) -> Option<i64> {
        if self.height.is_finite() && self.height > 0.0 {
            Some(self.height.round() as i64)
        } else {
            None
        }
    }
}

/// Join the span texts of one page into the page's running text.
///
/// Whitespace-only spans are kept: runs of blanks are the only paragraph
/// signal left in linearized PDF text.
pub fn page_text(spans: &[TextSpan]) -> String {
    spans
        .iter()
        .map(|span| span.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_height() {
        assert_eq!(TextSpan::new("A", 17.6, 1).rounded_height(), Some(18));
        assert_eq!(TextSpan::new("A", 12.4, 1).rounded_height(), Some(12));
        assert_eq!(TextSpan::new("A", 0.0, 1).rounded_height(), None);
        assert_eq!(TextSpan::new("A", f32::NAN, 1).rounded_height(), None);
    }

    #[test]
    fn test_page_text_keeps_blank_spans() {
        let spans = vec![
            TextSpan::new("First", 10.0, 1),
            TextSpan::new(" ", 10.0, 1),
            TextSpan::new("Second", 10.0, 1),
        ];
        assert_eq!(page_text(&spans), "First   Second");
    }

    #[test]
    fn test_span_deserialize() {
        let span: TextSpan =
            serde_json::from_str(r#"{"text":"Intro","height":18.0,"page":1}"#).unwrap();
        assert_eq!(span, TextSpan::new("Intro", 18.0, 1));
    }
}
