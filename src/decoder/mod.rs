//! Boundary to the PDF decoder.
//!
//! The analysis core never touches PDF bytes. A decoder hands it, per page,
//! the glyph runs with their rendered heights, plus the metadata title.
//! [`MemoryDecoder`] serves span dumps produced by an external extractor.

mod backend;
mod memory;

pub use backend::{DocumentSource, PdfDecoder};
pub use memory::{MemoryDecoder, MemoryDocument, SpanDump, SpanDumpFile};
