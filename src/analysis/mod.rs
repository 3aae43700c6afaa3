//! Text analysis heuristics.
//!
//! Each component works on one unit at a time (a description, a text, a
//! page) and keeps no state between calls:
//!
//! - [`KeywordExtractor`] turns persona and task descriptions into keywords
//! - [`RelevanceScorer`] scores a text against those keywords
//! - [`HeadingClassifier`] infers headings from glyph heights
//! - [`SectionSegmenter`] splits page text into titled sections

pub mod config;
mod headings;
mod keywords;
mod normalize;
mod relevance;
mod segment;

pub use config::{AnalysisConfig, Preset, ScoringWeights};
pub use headings::{FontSizeClusters, FontStatistics, HeadingClassifier};
pub use keywords::{extract_keywords, KeywordExtractor, STOP_WORDS};
pub use normalize::{normalize_spans, normalize_text};
pub use relevance::{RelevanceQuery, RelevanceScorer, PROFESSIONAL_VOCABULARY};
pub use segment::SectionSegmenter;
