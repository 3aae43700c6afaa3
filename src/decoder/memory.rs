//! In-memory decoder backed by span dumps.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};
use crate::model::TextSpan;

use super::{DocumentSource, PdfDecoder};

/// Serialized output of an external glyph extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanDump {
    /// Title from the document metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Declared page count (pages without text carry no spans)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// All glyph runs, in content order
    #[serde(default)]
    pub spans: Vec<TextSpan>,
}

impl SpanDump {
    /// Create a dump from spans.
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self {
            title: None,
            page_count: None,
            spans,
        }
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the declared page count.
    pub fn with_page_count(mut self, count: u32) -> Self {
        self.page_count = Some(count);
        self
    }

    /// Parse a dump from JSON bytes.
    pub fn from_slice(data: &[u8]) -> DecodeResult<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Read a dump from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> DecodeResult<Self> {
        let data = fs::read(path)?;
        Self::from_slice(&data)
    }
}

/// Decoder serving spans already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDecoder {
    pages: BTreeMap<u32, Vec<TextSpan>>,
    page_count: u32,
    title: Option<String>,
}

impl MemoryDecoder {
    /// Build a decoder from a span dump.
    pub fn from_dump(dump: SpanDump) -> Self {
        let mut pages: BTreeMap<u32, Vec<TextSpan>> = BTreeMap::new();
        for span in dump.spans {
            if span.page == 0 {
                log::debug!("Dropping span with page 0: {:?}", span.text);
                continue;
            }
            pages.entry(span.page).or_default().push(span);
        }

        let highest = pages.keys().next_back().copied().unwrap_or(0);
        let page_count = dump.page_count.unwrap_or(0).max(highest);

        Self {
            pages,
            page_count,
            title: dump.title,
        }
    }

    /// Build a decoder from spans.
    pub fn from_spans(spans: Vec<TextSpan>) -> Self {
        Self::from_dump(SpanDump::new(spans))
    }
}

impl PdfDecoder for MemoryDecoder {
    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn text_spans(&self, page: u32) -> DecodeResult<Vec<TextSpan>> {
        if page == 0 || page > self.page_count {
            return Err(DecodeError::PageOutOfRange(page, self.page_count));
        }
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    fn metadata_title(&self) -> Option<String> {
        self.title.clone()
    }
}

/// A named in-memory document.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    filename: String,
    dump: SpanDump,
}

impl MemoryDocument {
    /// Create a document from a filename and its span dump.
    pub fn new(filename: impl Into<String>, dump: SpanDump) -> Self {
        Self {
            filename: filename.into(),
            dump,
        }
    }

    /// Create a document from a filename and spans.
    pub fn from_spans(filename: impl Into<String>, spans: Vec<TextSpan>) -> Self {
        Self::new(filename, SpanDump::new(spans))
    }
}

impl DocumentSource for MemoryDocument {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn open(&self) -> DecodeResult<Box<dyn PdfDecoder>> {
        Ok(Box::new(MemoryDecoder::from_dump(self.dump.clone())))
    }
}

/// A span dump stored on disk, read when opened.
#[derive(Debug, Clone)]
pub struct SpanDumpFile {
    path: PathBuf,
    filename: String,
}

impl SpanDumpFile {
    /// Reference a dump file. `report.pdf.json` reports as `report.pdf`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = dump_filename(&path);
        Self { path, filename }
    }

    /// Override the reported filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Path of the dump file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for SpanDumpFile {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn open(&self) -> DecodeResult<Box<dyn PdfDecoder>> {
        let dump = SpanDump::from_path(&self.path).map_err(|e| DecodeError::Open {
            document: self.filename.clone(),
            reason: e.to_string(),
        })?;
        Ok(Box::new(MemoryDecoder::from_dump(dump)))
    }
}

/// Reported filename for a dump path.
fn dump_filename(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.strip_suffix(".json") {
        Some(inner) if Path::new(inner).extension().is_some() => inner.to_string(),
        _ => name,
    }
}
