//! Value types flowing through the analysis.
//!
//! Every type here is a plain value: produced by one stage, read by the
//! next, and never shared mutably.

mod outline;
mod persona;
mod section;
mod span;

pub use outline::{document_title, HeadingLevel, OutlineItem, PdfOutline};
pub use persona::{
    importance_rank, AnalysisMetadata, ExtractedSection, PersonaAnalysis, SubSectionAnalysis,
    MAX_IMPORTANCE_RANK,
};
pub use section::Section;
pub use span::{page_text, TextSpan};
