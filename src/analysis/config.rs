//! Analysis options and heuristic presets.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Named bundles of heuristic thresholds.
///
/// The presets differ in page caps, score cutoffs, and scheduling; none is
/// more correct than the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Balanced defaults, sequential scheduling
    #[default]
    Standard,
    /// Short page caps, headings may contain periods
    Basic,
    /// Lower cutoffs, larger result sets, parallel fan-out
    Concurrent,
}

impl Preset {
    /// All presets, in declaration order.
    pub const ALL: [Preset; 3] = [Preset::Standard, Preset::Basic, Preset::Concurrent];

    /// Preset name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Standard => "standard",
            Preset::Basic => "basic",
            Preset::Concurrent => "concurrent",
        }
    }
}

/// Weights of the relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Term-frequency weight of persona keywords
    pub persona: f64,
    /// Term-frequency weight of job keywords, also applied to their context bonus
    pub job: f64,
    /// Bonus per co-occurring keyword inside a match window
    pub context_increment: f64,
    /// Cap on the accumulated context bonus of one keyword
    pub context_cap: f64,
    /// Width of the window around a match, in characters of lower-cased text
    pub context_window: usize,
    /// Bonus per professional vocabulary term present
    pub vocabulary_bonus: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            persona: 0.8,
            job: 1.2,
            context_increment: 0.05,
            context_cap: 0.3,
            context_window: 100,
            vocabulary_bonus: 0.1,
        }
    }
}

/// Options for outline extraction and persona analysis.
///
/// All length bounds are exclusive and counted in characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pages scanned per document for the outline
    pub outline_max_pages: u32,

    /// Pages scanned per document for persona analysis
    pub persona_max_pages: u32,

    /// Documents scanned per persona analysis (`None` = all)
    pub max_documents: Option<usize>,

    /// Number of largest height clusters promoted to headings
    pub heading_clusters: usize,

    /// Heading text must be longer than this
    pub heading_min_len: usize,

    /// Heading text must be shorter than this
    pub heading_max_len: usize,

    /// Reject heading candidates containing a period
    pub reject_heading_periods: bool,

    /// Paragraphs must be longer than this to become sections
    pub min_paragraph_len: usize,

    /// Sentences must be longer than this to join a fallback chunk
    pub min_chunk_sentence_len: usize,

    /// Sentences must be longer than this to be scored for excerpts
    pub min_sentence_len: usize,

    /// A section qualifies when its score exceeds this
    pub section_threshold: f64,

    /// A sentence joins an excerpt when its score exceeds this
    pub sentence_threshold: f64,

    /// Sentences per excerpt
    pub excerpt_sentences: usize,

    /// Cap on extracted sections
    pub max_sections: usize,

    /// Cap on sub-section excerpts
    pub max_subsections: usize,

    /// Fan pages and documents out over a worker pool
    pub parallel: bool,

    /// Worker threads (0 = available parallelism)
    pub max_workers: usize,

    /// Relevance score weights
    pub weights: ScoringWeights,
}

impl AnalysisConfig {
    /// Create options with the standard preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from a preset.
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Standard => Self::standard(),
            Preset::Basic => Self::basic(),
            Preset::Concurrent => Self::concurrent(),
        }
    }

    /// Standard preset.
    pub fn standard() -> Self {
        Self {
            outline_max_pages: 50,
            persona_max_pages: 50,
            max_documents: None,
            heading_clusters: 3,
            heading_min_len: 3,
            heading_max_len: 100,
            reject_heading_periods: true,
            min_paragraph_len: 50,
            min_chunk_sentence_len: 30,
            min_sentence_len: 20,
            section_threshold: 0.3,
            sentence_threshold: 0.4,
            excerpt_sentences: 3,
            max_sections: 10,
            max_subsections: 15,
            parallel: false,
            max_workers: 0,
            weights: ScoringWeights::default(),
        }
    }

    /// Basic preset.
    pub fn basic() -> Self {
        Self {
            outline_max_pages: 25,
            persona_max_pages: 25,
            reject_heading_periods: false,
            ..Self::standard()
        }
    }

    /// Concurrent preset.
    pub fn concurrent() -> Self {
        Self {
            outline_max_pages: 50,
            persona_max_pages: 30,
            max_documents: Some(10),
            heading_clusters: 4,
            heading_min_len: 5,
            section_threshold: 0.2,
            sentence_threshold: 0.3,
            excerpt_sentences: 2,
            max_sections: 15,
            max_subsections: 20,
            parallel: true,
            ..Self::standard()
        }
    }

    /// Set the outline page cap.
    pub fn with_outline_max_pages(mut self, pages: u32) -> Self {
        self.outline_max_pages = pages;
        self
    }

    /// Set the persona page cap.
    pub fn with_persona_max_pages(mut self, pages: u32) -> Self {
        self.persona_max_pages = pages;
        self
    }

    /// Set the document cap.
    pub fn with_max_documents(mut self, documents: Option<usize>) -> Self {
        self.max_documents = documents;
        self
    }

    /// Set how many height clusters become headings.
    pub fn with_heading_clusters(mut self, clusters: usize) -> Self {
        self.heading_clusters = clusters;
        self
    }

    /// Set the exclusive heading length band.
    pub fn with_heading_len(mut self, min: usize, max: usize) -> Self {
        self.heading_min_len = min;
        self.heading_max_len = max;
        self
    }

    /// Accept or reject headings containing periods.
    pub fn with_heading_periods(mut self, reject: bool) -> Self {
        self.reject_heading_periods = reject;
        self
    }

    /// Set section and sentence score thresholds.
    pub fn with_thresholds(mut self, section: f64, sentence: f64) -> Self {
        self.section_threshold = section;
        self.sentence_threshold = sentence;
        self
    }

    /// Set result caps.
    pub fn with_result_caps(mut self, sections: usize, subsections: usize) -> Self {
        self.max_sections = sections;
        self.max_subsections = subsections;
        self
    }

    /// Set sentences per excerpt.
    pub fn with_excerpt_sentences(mut self, sentences: usize) -> Self {
        self.excerpt_sentences = sentences;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the worker thread count (0 = available parallelism).
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Set scoring weights.
    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Number of worker threads to start.
    pub fn worker_count(&self) -> usize {
        if self.max_workers > 0 {
            return self.max_workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("section_threshold", self.section_threshold),
            ("sentence_threshold", self.sentence_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.heading_clusters == 0 {
            return Err(Error::InvalidConfig(
                "heading_clusters must be at least 1".into(),
            ));
        }

        if self.heading_min_len >= self.heading_max_len.saturating_sub(1) {
            return Err(Error::InvalidConfig(format!(
                "heading length band ({}, {}) admits no text",
                self.heading_min_len, self.heading_max_len
            )));
        }

        for (name, value) in [
            ("outline_max_pages", self.outline_max_pages as usize),
            ("persona_max_pages", self.persona_max_pages as usize),
            ("excerpt_sentences", self.excerpt_sentences),
            ("max_sections", self.max_sections),
            ("max_subsections", self.max_subsections),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be at least 1", name)));
            }
        }

        if self.max_documents == Some(0) {
            return Err(Error::InvalidConfig(
                "max_documents must be at least 1".into(),
            ));
        }

        let w = &self.weights;
        let weights = [
            w.persona,
            w.job,
            w.context_increment,
            w.context_cap,
            w.vocabulary_bonus,
        ];
        if weights.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidConfig(
                "scoring weights must be finite and non-negative".into(),
            ));
        }

        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<Preset> for AnalysisConfig {
    fn from(preset: Preset) -> Self {
        Self::from_preset(preset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::new()
            .with_outline_max_pages(10)
            .with_heading_clusters(4)
            .with_thresholds(0.25, 0.35)
            .with_result_caps(12, 18)
            .with_max_workers(2)
            .with_heading_periods(false)
            .with_parallel(true);

        assert_eq!(config.outline_max_pages, 10);
        assert_eq!(config.heading_clusters, 4);
        assert_eq!(config.section_threshold, 0.25);
        assert_eq!(config.max_subsections, 18);
        assert_eq!(config.worker_count(), 2);
        assert!(!config.reject_heading_periods);
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_is_standard() {
        let config = AnalysisConfig::default();
        assert_eq!(config, AnalysisConfig::from_preset(Preset::Standard));
        assert_eq!(config.max_sections, 10);
        assert_eq!(config.max_subsections, 15);
        assert!(config.reject_heading_periods);
        assert!(!config.parallel);
    }

    #[test]
    fn test_presets_validate() {
        for preset in Preset::ALL {
            assert!(AnalysisConfig::from(preset).validate().is_ok(), "{:?}", preset);
        }
        assert!(AnalysisConfig::concurrent().parallel);
        assert!(!AnalysisConfig::basic().reject_heading_periods);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(AnalysisConfig::new()
            .with_thresholds(1.5, 0.4)
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_heading_clusters(0)
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_heading_len(10, 5)
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_result_caps(0, 5)
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_max_documents(Some(0))
            .validate()
            .is_err());
        assert!(AnalysisConfig::new()
            .with_weights(ScoringWeights {
                job: -1.0,
                ..ScoringWeights::default()
            })
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_extreme_heading_lengths() {
        let config: AnalysisConfig =
            serde_json::from_str(&format!(r#"{{"heading_min_len": {}}}"#, usize::MAX)).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        assert!(AnalysisConfig::new().with_heading_len(0, 0).validate().is_err());
        assert!(AnalysisConfig::new().with_heading_len(3, 4).validate().is_err());
        assert!(AnalysisConfig::new().with_heading_len(3, 5).validate().is_ok());
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"max_sections": 5, "parallel": true}"#).unwrap();
        assert_eq!(config.max_sections, 5);
        assert!(config.parallel);
        assert_eq!(config.max_subsections, 15);
    }

    #[test]
    fn test_preset_serde_names() {
        let preset: Preset = serde_json::from_str("\"concurrent\"").unwrap();
        assert_eq!(preset, Preset::Concurrent);
        assert_eq!(Preset::Basic.name(), "basic");
    }
}
