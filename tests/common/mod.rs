//! Shared fixtures for integration tests.

#![allow(dead_code)]

use pdflens::{
    DecodeError, DocumentSource, MemoryDecoder, MemoryDocument, PdfDecoder, SpanDump, TextSpan,
};

pub const PERSONA: &str = "Investment Analyst";
pub const JOB: &str = "Analyze revenue trends";

/// A paragraph that scores well for the persona and job above.
pub const REVENUE: &str = "Revenue Growth. Revenue trends improved as revenue rose in every \
                           region this year. Further revenue trends point to steady revenue \
                           gains next year";

/// A paragraph with nothing relevant in it.
pub const NEUTRAL: &str = "The cafeteria menu changed on Tuesday and the staff enjoyed \
                           the new soup options very much";

/// Spans of one page: each paragraph is one span, separated by blank spans.
pub fn page(number: u32, paragraphs: &[&str]) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            spans.push(TextSpan::new(" ", 10.0, number));
        }
        spans.push(TextSpan::new(*paragraph, 10.0, number));
    }
    spans
}

/// A document whose pages all hold the same paragraphs.
pub fn document(name: &str, pages: u32, paragraphs: &[&str]) -> MemoryDocument {
    let spans = (1..=pages).flat_map(|p| page(p, paragraphs)).collect();
    MemoryDocument::from_spans(name, spans)
}

/// Decoder failing on selected pages.
pub struct FlakyDecoder {
    inner: MemoryDecoder,
    failing: Vec<u32>,
}

impl PdfDecoder for FlakyDecoder {
    fn page_count(&self) -> u32 {
        self.inner.page_count()
    }

    fn text_spans(&self, page: u32) -> Result<Vec<TextSpan>, DecodeError> {
        if self.failing.contains(&page) {
            return Err(DecodeError::Page {
                page,
                reason: "corrupt content stream".into(),
            });
        }
        self.inner.text_spans(page)
    }

    fn metadata_title(&self) -> Option<String> {
        self.inner.metadata_title()
    }
}

/// Document source with injectable failures.
pub struct FlakySource {
    pub filename: String,
    pub dump: SpanDump,
    pub failing_pages: Vec<u32>,
    pub fails_to_open: bool,
}

impl FlakySource {
    pub fn new(filename: &str, spans: Vec<TextSpan>) -> Self {
        Self {
            filename: filename.to_string(),
            dump: SpanDump::new(spans),
            failing_pages: Vec::new(),
            fails_to_open: false,
        }
    }

    pub fn failing_pages(mut self, pages: &[u32]) -> Self {
        self.failing_pages = pages.to_vec();
        self
    }

    pub fn unopenable(mut self) -> Self {
        self.fails_to_open = true;
        self
    }
}

impl DocumentSource for FlakySource {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn open(&self) -> Result<Box<dyn PdfDecoder>, DecodeError> {
        if self.fails_to_open {
            return Err(DecodeError::Open {
                document: self.filename.clone(),
                reason: "truncated file".into(),
            });
        }
        Ok(Box::new(FlakyDecoder {
            inner: MemoryDecoder::from_dump(self.dump.clone()),
            failing: self.failing_pages.clone(),
        }))
    }
}
