//! Error types for pdflens.

use std::io;
use thiserror::Error;

/// Result type alias for pdflens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for decoder operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Errors raised by a PDF decoder at the boundary of the analysis core.
///
/// These never reach callers of the two analysis entry points directly:
/// page failures are skipped, and document failures are either skipped or
/// wrapped in a domain-level [`Error`].
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The document could not be opened or its buffer could not be read.
    #[error("Cannot open {document}: {reason}")]
    Open { document: String, reason: String },

    /// Text extraction failed for a single page.
    #[error("Cannot extract text from page {page}: {reason}")]
    Page { page: u32, reason: String },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// I/O error while reading a span dump.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed span dump.
    #[error("Invalid span dump: {0}")]
    Json(#[from] serde_json::Error),
}

/// Domain-level errors surfaced to callers.
#[derive(Error, Debug)]
pub enum Error {
    /// The single-document outline path could not produce a result.
    #[error("Failed to process PDF {document}: {reason}")]
    ProcessPdf { document: String, reason: String },

    /// The persona path had no usable document or page.
    #[error("Failed to analyze documents: {0}")]
    AnalyzeDocuments(String),

    /// Another analysis is running on the same analyzer.
    #[error("Another analysis is already in progress")]
    AnalysisInProgress,

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A decoder error surfaced outside the analysis entry points.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The worker pool or a background task failed.
    #[error("Worker error: {0}")]
    Worker(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Wrap a decoder failure for the outline path.
    pub(crate) fn process_pdf(document: impl Into<String>, reason: impl ToString) -> Self {
        Error::ProcessPdf {
            document: document.into(),
            reason: reason.to_string(),
        }
    }
}
