//! Persona analysis output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Highest importance rank.
pub const MAX_IMPORTANCE_RANK: u8 = 10;

/// Scale a relevance score in [0, 1] to an importance rank in [0, 10].
pub fn importance_rank(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score.clamp(0.0, 1.0) * f64::from(MAX_IMPORTANCE_RANK)).round() as u8
}

/// A section judged relevant to the persona and task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedSection {
    /// Source document filename
    pub document: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Section title
    pub section_title: String,

    /// Relevance on a 0-10 scale, higher is more relevant
    pub importance_rank: u8,
}

/// Refined excerpt built from the best sentences of a relevant section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSectionAnalysis {
    /// Source document filename
    pub document: String,

    /// Concatenated top sentences
    pub refined_text: String,

    /// Page number (1-indexed)
    pub page_number: u32,
}

/// Inputs of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Input filenames, each listed once in input order
    pub documents: Vec<String>,

    /// Persona description
    pub persona: String,

    /// Job-to-be-done description
    pub job_to_be_done: String,

    /// When the analysis ran
    pub timestamp: DateTime<Utc>,
}

impl AnalysisMetadata {
    /// Create metadata stamped with the current time.
    pub fn new<I, S>(documents: I, persona: impl Into<String>, job: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in documents {
            let name = name.into();
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Self {
            documents: names,
            persona: persona.into(),
            job_to_be_done: job.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Result of one persona-driven analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAnalysis {
    /// Run metadata
    pub metadata: AnalysisMetadata,

    /// Ranked sections, most relevant first
    pub extracted_sections: Vec<ExtractedSection>,

    /// Ranked excerpts
    pub sub_section_analysis: Vec<SubSectionAnalysis>,
}

impl PersonaAnalysis {
    /// Check if nothing relevant was found.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty() && self.sub_section_analysis.is_empty()
    }
}
