//! Decoder abstraction layer.
//!
//! Provides a trait-based interface for page and metadata access, isolating
//! whatever extracts glyphs from PDF files from the analysis logic.

use crate::error::DecodeResult;
use crate::model::TextSpan;

/// Read access to one opened document.
///
/// Implementations must be shareable across worker threads; pages may be
/// requested concurrently and in any order.
pub trait PdfDecoder: Send + Sync {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Glyph runs of one page (1-indexed), in content order.
    fn text_spans(&self, page: u32) -> DecodeResult<Vec<TextSpan>>;

    /// Title from the document metadata, if any.
    fn metadata_title(&self) -> Option<String>;
}

/// A not-yet-opened input document.
pub trait DocumentSource: Send + Sync {
    /// Filename reported in results (e.g. `report.pdf`).
    fn filename(&self) -> &str;

    /// Open the document. Fails when the file or its buffer cannot be read.
    fn open(&self) -> DecodeResult<Box<dyn PdfDecoder>>;
}
