//! Keyword extraction from persona and task descriptions.

use std::collections::HashSet;

use regex::Regex;

/// Common English function words that carry no topic.
pub const STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "or", "but", "nor", "yet", "so", "for", "because", "while", "although", "though",
    "unless", "whether", "if", "than", "then",
    // prepositions
    "in", "on", "at", "to", "from", "with", "by", "of", "about", "into", "onto", "over",
    "under", "between", "through", "during", "before", "after", "above", "below", "upon",
    "within", "without", "across", "against", "among", "around", "along", "behind", "beyond",
    "near", "toward", "towards", "via",
    // auxiliary verbs
    "is", "am", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "done",
    // modal verbs
    "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // other function words
    "this", "that", "these", "those", "it", "its", "they", "them", "their", "there", "here",
    "what", "which", "who", "whom", "whose", "when", "where", "why", "how", "not", "also",
    "very", "such", "some", "any", "all", "each", "every", "both", "other", "more", "most",
    "only", "just", "our", "your", "you", "we", "my",
];

/// Splits free text into topic keywords.
pub struct KeywordExtractor {
    stop_words: HashSet<&'static str>,
    non_word: Regex,
}

impl KeywordExtractor {
    /// Tokens this short (in characters) are discarded.
    pub const MAX_SHORT_TOKEN: usize = 2;

    /// Create an extractor with the built-in stop-word list.
    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            non_word: Regex::new(r"\W+").unwrap(),
        }
    }

    /// Extract keywords from lower-cased text.
    ///
    /// Duplicates are kept: a term named twice weighs twice.
    pub fn extract(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|token| token.chars().count() > Self::MAX_SHORT_TOKEN)
            .filter(|token| !self.is_stop_word(token))
            .map(|token| self.non_word.replace_all(token, "").into_owned())
            .filter(|token| token.chars().count() > Self::MAX_SHORT_TOKEN)
            .collect()
    }

    /// Check if a word is on the stop-word list.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract keywords with a throwaway extractor.
pub fn extract_keywords(text: &str) -> Vec<String> {
    KeywordExtractor::new().extract(text)
}
