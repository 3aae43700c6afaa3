//! Keyword relevance scoring against a persona and a job-to-be-done.
//!
//! The score combines three signals, clamped to [0, 1]:
//!
//! - weighted term frequency of persona and job keywords (job dominates),
//! - a context bonus when different keywords appear close together,
//! - a small prior for professional or academic vocabulary.

use regex::Regex;

use super::config::ScoringWeights;
use super::keywords::KeywordExtractor;

/// Terms typical of technical and analytical prose.
pub const PROFESSIONAL_VOCABULARY: &[&str] = &[
    "analysis",
    "research",
    "method",
    "methodology",
    "results",
    "findings",
    "study",
    "evaluation",
    "framework",
    "approach",
    "conclusion",
    "assessment",
    "implementation",
    "performance",
    "data",
];

/// Word-boundary, case-insensitive pattern for a literal term.
fn word_pattern(term: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).ok()
}

/// A distinct keyword with its compiled matcher.
#[derive(Debug, Clone)]
struct Term {
    word: String,
    pattern: Regex,
}

/// Keywords of one persona/job pair, compiled once and reused across texts.
#[derive(Debug, Clone)]
pub struct RelevanceQuery {
    /// Distinct keywords from both descriptions
    terms: Vec<Term>,
    /// Persona keywords as indexes into `terms`, duplicates kept
    persona: Vec<usize>,
    /// Job keywords as indexes into `terms`, duplicates kept
    job: Vec<usize>,
}

impl RelevanceQuery {
    /// Build a query from persona and job descriptions.
    pub fn new(extractor: &KeywordExtractor, persona: &str, job: &str) -> Self {
        let mut query = Self {
            terms: Vec::new(),
            persona: Vec::new(),
            job: Vec::new(),
        };

        for word in extractor.extract(&persona.to_lowercase()) {
            if let Some(index) = query.intern(word) {
                query.persona.push(index);
            }
        }
        for word in extractor.extract(&job.to_lowercase()) {
            if let Some(index) = query.intern(word) {
                query.job.push(index);
            }
        }

        query
    }

    fn intern(&mut self, word: String) -> Option<usize> {
        if let Some(index) = self.terms.iter().position(|t| t.word == word) {
            return Some(index);
        }
        let pattern = word_pattern(&word)?;
        self.terms.push(Term { word, pattern });
        Some(self.terms.len() - 1)
    }

    /// Persona keywords, in extraction order.
    pub fn persona_keywords(&self) -> impl Iterator<Item = &str> {
        self.persona.iter().map(|&i| self.terms[i].word.as_str())
    }

    /// Job keywords, in extraction order.
    pub fn job_keywords(&self) -> impl Iterator<Item = &str> {
        self.job.iter().map(|&i| self.terms[i].word.as_str())
    }

    /// Check if neither description produced a keyword.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Distinct values of `indexes`, first occurrence order.
fn distinct(indexes: &[usize]) -> Vec<usize> {
    let mut seen = Vec::with_capacity(indexes.len());
    for &index in indexes {
        if !seen.contains(&index) {
            seen.push(index);
        }
    }
    seen
}

/// Character index of a byte offset, given the byte offset of every char.
fn char_offset(boundaries: &[usize], byte: usize) -> usize {
    boundaries.partition_point(|&b| b < byte)
}

/// Scores text spans against persona and job keywords.
pub struct RelevanceScorer {
    extractor: KeywordExtractor,
    weights: ScoringWeights,
    vocabulary: Vec<Regex>,
}

impl RelevanceScorer {
    /// Create a scorer with the given weights.
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            weights,
            vocabulary: PROFESSIONAL_VOCABULARY
                .iter()
                .filter_map(|term| word_pattern(term))
                .collect(),
        }
    }

    /// Compile the keywords of a persona/job pair.
    pub fn query(&self, persona: &str, job: &str) -> RelevanceQuery {
        RelevanceQuery::new(&self.extractor, persona, job)
    }

    /// Score `text` against a persona and job description.
    pub fn score(&self, text: &str, persona: &str, job: &str) -> f64 {
        self.score_query(text, &self.query(persona, job))
    }

    /// Score `text` against a compiled query.
    pub fn score_query(&self, text: &str, query: &RelevanceQuery) -> f64 {
        let lower = text.to_lowercase();
        let total_words = lower.split_whitespace().count();
        if total_words == 0 {
            return 0.0;
        }
        let total_words = total_words as f64;

        // Character ranges of every match, per distinct term
        let boundaries: Vec<usize> = lower.char_indices().map(|(i, _)| i).collect();
        let matches: Vec<Vec<(usize, usize)>> = query
            .terms
            .iter()
            .map(|term| {
                term.pattern
                    .find_iter(&lower)
                    .map(|m| {
                        (
                            char_offset(&boundaries, m.start()),
                            char_offset(&boundaries, m.end()),
                        )
                    })
                    .collect()
            })
            .collect();

        let w = &self.weights;
        let mut score = 0.0;

        for &index in &query.persona {
            score += matches[index].len() as f64 / total_words * w.persona;
        }
        for &index in &query.job {
            score += matches[index].len() as f64 / total_words * w.job;
        }

        for index in distinct(&query.persona) {
            score += self.context_bonus(index, &matches);
        }
        for index in distinct(&query.job) {
            score += self.context_bonus(index, &matches) * w.job;
        }

        let vocabulary_hits = self
            .vocabulary
            .iter()
            .filter(|pattern| pattern.is_match(&lower))
            .count();
        score += vocabulary_hits as f64 * w.vocabulary_bonus;

        score.clamp(0.0, 1.0)
    }

    /// Bonus for other keywords found near each occurrence of `index`.
    fn context_bonus(&self, index: usize, matches: &[Vec<(usize, usize)>]) -> f64 {
        let w = &self.weights;
        let half = w.context_window / 2;
        let mut bonus = 0.0;

        for &(start, end) in &matches[index] {
            let lo = start.saturating_sub(half);
            let hi = end.saturating_add(half);

            let neighbours = matches
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .filter(|(_, spans)| spans.iter().any(|&(s, e)| s >= lo && e <= hi))
                .count();
            bonus += neighbours as f64 * w.context_increment;
        }

        bonus.min(w.context_cap)
    }
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default())
    }
}
