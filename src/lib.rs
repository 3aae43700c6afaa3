//! # pdflens
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! The crate works on text spans (glyph runs with a rendered height) that a
//! PDF decoder hands over page by page. From them it infers a document's
//! heading outline, or ranks the sections of several documents by their
//! relevance to a reader (persona) and the task they are doing
//! (job-to-be-done).
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pdflens::{Analyzer, DocumentSource, SpanDumpFile};
//!
//! fn main() -> pdflens::Result<()> {
//!     let analyzer = Analyzer::new();
//!
//!     // Outline of one document
//!     let outline = analyzer.extract_outline(&SpanDumpFile::new("report.pdf.json"))?;
//!     for item in &outline.outline {
//!         println!("{} {} (p. {})", item.level, item.text, item.page);
//!     }
//!
//!     // Sections of several documents ranked for a persona
//!     let sources: Vec<Arc<dyn DocumentSource>> = vec![
//!         Arc::new(SpanDumpFile::new("q1.pdf.json")),
//!         Arc::new(SpanDumpFile::new("q2.pdf.json")),
//!     ];
//!     let analysis = analyzer.analyze_for_persona(
//!         &sources,
//!         "Investment Analyst",
//!         "Analyze revenue trends",
//!     )?;
//!     println!("{}", pdflens::render::to_json(&analysis, pdflens::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline inference**: headings from glyph-height clusters
//! - **Relevance ranking**: keyword, proximity and vocabulary scoring
//! - **Fault tolerance**: unreadable pages and documents are skipped
//! - **Parallel processing**: optional rayon worker pool
//! - **Async**: tokio wrappers behind the `async` feature

pub mod analysis;
pub mod decoder;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use analysis::{AnalysisConfig, Preset, ScoringWeights};
pub use decoder::{DocumentSource, MemoryDecoder, MemoryDocument, PdfDecoder, SpanDump, SpanDumpFile};
pub use error::{DecodeError, Error, Result};
pub use model::{
    AnalysisMetadata, ExtractedSection, HeadingLevel, OutlineItem, PdfOutline, PersonaAnalysis,
    Section, SubSectionAnalysis, TextSpan,
};
pub use pipeline::{progress_channel, Progress};
pub use render::JsonFormat;

use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Sender;

use pipeline::{InFlight, InProgress, ProgressSink, WorkerPool};

/// Extract the heading outline of a document with default options.
///
/// # Example
///
/// ```no_run
/// use pdflens::{extract_outline, MemoryDocument, TextSpan};
///
/// let doc = MemoryDocument::from_spans(
///     "guide.pdf",
///     vec![TextSpan::new("Introduction", 18.0, 1)],
/// );
/// let outline = extract_outline(&doc).unwrap();
/// assert_eq!(outline.title, "guide");
/// ```
pub fn extract_outline(source: &dyn DocumentSource) -> Result<PdfOutline> {
    Analyzer::new().extract_outline(source)
}

/// Extract the heading outline of a span-dump file with default options.
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Result<PdfOutline> {
    extract_outline(&SpanDumpFile::new(path.as_ref()))
}

/// Rank document sections for a persona with default options.
pub fn analyze_for_persona(
    sources: &[Arc<dyn DocumentSource>],
    persona: &str,
    job: &str,
) -> Result<PersonaAnalysis> {
    Analyzer::new().analyze_for_persona(sources, persona, job)
}

/// Entry point for outline extraction and persona analysis.
///
/// Only one analysis runs at a time per analyzer (and its clones); a call
/// made while another is running fails with [`Error::AnalysisInProgress`].
///
/// # Example
///
/// ```no_run
/// use pdflens::{Analyzer, Preset, SpanDumpFile};
///
/// let analyzer = Analyzer::new()
///     .with_preset(Preset::Concurrent)
///     .sequential();
/// let outline = analyzer.extract_outline(&SpanDumpFile::new("guide.pdf.json"))?;
/// # Ok::<(), pdflens::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    in_progress: InProgress,
    progress: ProgressSink,
}

impl Analyzer {
    /// Create an analyzer with the standard preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set analysis options.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a preset's options.
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.config = AnalysisConfig::from_preset(preset);
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.config = self.config.sequential();
        self
    }

    /// Send progress events to a channel.
    pub fn with_progress(mut self, tx: Sender<Progress>) -> Self {
        self.progress = ProgressSink::new(Some(tx));
        self
    }

    /// Get the analysis options.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Check if an analysis is running.
    pub fn is_in_progress(&self) -> bool {
        self.in_progress.is_set()
    }

    /// Extract the heading outline of one document.
    pub fn extract_outline(&self, source: &dyn DocumentSource) -> Result<PdfOutline> {
        let _guard = self.begin()?;
        self.run_outline(source)
    }

    /// Rank the sections of `sources` for a persona and a job-to-be-done.
    pub fn analyze_for_persona(
        &self,
        sources: &[Arc<dyn DocumentSource>],
        persona: &str,
        job: &str,
    ) -> Result<PersonaAnalysis> {
        let _guard = self.begin()?;
        self.run_persona(sources, persona, job)
    }

    /// Extract an outline on tokio's blocking pool.
    #[cfg(feature = "async")]
    pub async fn extract_outline_async(
        &self,
        source: Arc<dyn DocumentSource>,
    ) -> Result<PdfOutline> {
        let guard = self.begin()?;
        let analyzer = self.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            analyzer.run_outline(source.as_ref())
        })
        .await
        .map_err(|e| Error::Worker(e.to_string()))?
    }

    /// Run a persona analysis on tokio's blocking pool.
    #[cfg(feature = "async")]
    pub async fn analyze_for_persona_async(
        &self,
        sources: Vec<Arc<dyn DocumentSource>>,
        persona: String,
        job: String,
    ) -> Result<PersonaAnalysis> {
        let guard = self.begin()?;
        let analyzer = self.clone();
        tokio::task::spawn_blocking(move || {
            let _guard = guard;
            analyzer.run_persona(&sources, &persona, &job)
        })
        .await
        .map_err(|e| Error::Worker(e.to_string()))?
    }

    fn begin(&self) -> Result<InFlight> {
        self.config.validate()?;
        self.in_progress.acquire()
    }

    fn run_outline(&self, source: &dyn DocumentSource) -> Result<PdfOutline> {
        let pool = WorkerPool::new(&self.config)?;
        pipeline::outline::run(source, &self.config, &pool, &self.progress)
    }

    fn run_persona(
        &self,
        sources: &[Arc<dyn DocumentSource>],
        persona: &str,
        job: &str,
    ) -> Result<PersonaAnalysis> {
        let pool = WorkerPool::new(&self.config)?;
        pipeline::persona::run(sources, persona, job, &self.config, &pool, &self.progress)
    }
}
