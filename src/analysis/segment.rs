//! Page text segmentation into candidate sections.

use regex::Regex;

use crate::model::Section;

use super::config::AnalysisConfig;

/// First sentences within this many characters may serve as a title.
const TITLE_LEN: std::ops::RangeInclusive<usize> = 10..=80;

/// Bounds on sentences per fallback chunk.
const MIN_CHUNK: usize = 3;
const MAX_CHUNK: usize = 8;

/// Splits the running text of a page into sections.
pub struct SectionSegmenter {
    paragraph_break: Regex,
    sentence_break: Regex,
    min_paragraph_len: usize,
    min_chunk_sentence_len: usize,
}

impl SectionSegmenter {
    /// Create a segmenter from analysis options.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            paragraph_break: Regex::new(r"\n\s*\n|\s{3,}").unwrap(),
            sentence_break: Regex::new(r"[.!?]+").unwrap(),
            min_paragraph_len: config.min_paragraph_len,
            min_chunk_sentence_len: config.min_chunk_sentence_len,
        }
    }

    /// Segment one page of text.
    ///
    /// Paragraph breaks are blank lines or runs of three or more whitespace
    /// characters. When the page has none, sentences are grouped into
    /// fixed-size chunks instead.
    pub fn segment(&self, text: &str) -> Vec<Section> {
        let fragments: Vec<&str> = self
            .paragraph_break
            .split(text)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();

        if fragments.len() <= 1 {
            return self.chunk_sentences(text);
        }

        fragments
            .into_iter()
            .filter(|p| p.chars().count() > self.min_paragraph_len)
            .enumerate()
            .map(|(i, paragraph)| {
                let sentences = self.split_sentences(paragraph);
                let title = match sentences.first() {
                    Some(first)
                        if sentences.len() > 1
                            && TITLE_LEN.contains(&first.chars().count()) =>
                    {
                        first.to_string()
                    }
                    _ => format!("Paragraph {}", i + 1),
                };
                Section::new(title, paragraph)
            })
            .collect()
    }

    /// Split text into trimmed, non-empty sentences.
    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.sentence_break
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn chunk_sentences(&self, text: &str) -> Vec<Section> {
        let sentences: Vec<&str> = self
            .split_sentences(text)
            .into_iter()
            .filter(|s| s.chars().count() > self.min_chunk_sentence_len)
            .collect();

        if sentences.is_empty() {
            return Vec::new();
        }

        let size = sentences.len().div_ceil(5).clamp(MIN_CHUNK, MAX_CHUNK);
        sentences
            .chunks(size)
            .enumerate()
            .map(|(i, chunk)| {
                Section::new(format!("Section {}", i + 1), format!("{}.", chunk.join(". ")))
            })
            .collect()
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_sentence(topic: &str) -> String {
        format!("The {} figures were reviewed in detail by the team", topic)
    }

    #[test]
    fn test_split_sentences() {
        let segmenter = SectionSegmenter::default();
        assert_eq!(
            segmenter.split_sentences("One. Two!! Three?  ... Four"),
            vec!["One", "Two", "Three", "Four"]
        );
        assert!(segmenter.split_sentences("...").is_empty());
    }

    #[test]
    fn test_paragraphs_with_titles() {
        let segmenter = SectionSegmenter::default();
        let text = format!(
            "Revenue Overview. {}. {}.\n\n{}, and nothing else was said about it at all",
            long_sentence("revenue"),
            long_sentence("cost"),
            long_sentence("market")
        );
        let sections = segmenter.segment(&text);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Revenue Overview");
        assert!(sections[0].text.starts_with("Revenue Overview."));
        assert_eq!(sections[1].title, "Paragraph 2");
    }

    #[test]
    fn test_short_paragraphs_dropped() {
        let segmenter = SectionSegmenter::default();
        let text = format!("Too short.   {}. {}.", long_sentence("a"), long_sentence("b"));
        let sections = segmenter.segment(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, long_sentence("a"));
    }

    #[test]
    fn test_long_first_sentence_not_a_title() {
        let segmenter = SectionSegmenter::default();
        let first = "A".repeat(81);
        let text = format!("{}. {}.\n\n{}.", first, long_sentence("x"), long_sentence("y"));
        let sections = segmenter.segment(&text);
        assert_eq!(sections[0].title, "Paragraph 1");
    }

    #[test]
    fn test_fallback_chunks() {
        let segmenter = SectionSegmenter::default();
        let sentences: Vec<String> = (0..20).map(|i| long_sentence(&format!("q{}", i))).collect();
        let text = format!("{}.", sentences.join(". "));
        let sections = segmenter.segment(&text);

        // 20 sentences -> chunks of 4
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].title, "Section 1");
        assert_eq!(sections[4].title, "Section 5");
        assert_eq!(
            sections[0].text,
            format!("{}.", sentences[..4].join(". "))
        );
    }

    #[test]
    fn test_fallback_chunk_size_bounds() {
        let segmenter = SectionSegmenter::default();

        let few: Vec<String> = (0..4).map(|i| long_sentence(&format!("f{}", i))).collect();
        let sections = segmenter.segment(&few.join(". "));
        assert_eq!(sections.len(), 2); // chunks of 3

        let many: Vec<String> = (0..50).map(|i| long_sentence(&format!("m{}", i))).collect();
        let sections = segmenter.segment(&many.join(". "));
        assert_eq!(sections.len(), 7); // chunks of 8
    }

    #[test]
    fn test_fallback_skips_short_sentences() {
        let segmenter = SectionSegmenter::default();
        let text = format!("Short one. Tiny. {}.", long_sentence("kept"));
        let sections = segmenter.segment(&text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].text, format!("{}.", long_sentence("kept")));
    }

    #[test]
    fn test_empty_page() {
        let segmenter = SectionSegmenter::default();
        assert!(segmenter.segment("").is_empty());
        assert!(segmenter.segment("    \n\n   ").is_empty());
    }
}
