//! Outline path: headings of one document.

use std::collections::HashSet;

use crate::analysis::{AnalysisConfig, HeadingClassifier};
use crate::decoder::DocumentSource;
use crate::error::{Error, Result};
use crate::model::{document_title, OutlineItem, PdfOutline};

use super::{for_each_page, Progress, ProgressSink, WorkerPool};

/// Extract the heading outline of one document.
///
/// Any failure that leaves no usable page is fatal for the whole call.
pub fn run(
    source: &dyn DocumentSource,
    config: &AnalysisConfig,
    pool: &WorkerPool,
    progress: &ProgressSink,
) -> Result<PdfOutline> {
    let document = source.filename();
    let decoder = source
        .open()
        .map_err(|e| Error::process_pdf(document, e))?;

    let page_count = decoder.page_count();
    if page_count == 0 {
        return Err(Error::process_pdf(document, "document has no pages"));
    }

    let scanned = page_count.min(config.outline_max_pages);
    progress.emit(Progress::DocumentStarted {
        document: document.to_string(),
        pages: scanned,
    });

    let classifier = HeadingClassifier::new(config);
    let pages = for_each_page(
        decoder.as_ref(),
        document,
        config.outline_max_pages,
        pool,
        progress,
        |page, spans| classifier.classify_page(spans, page),
    );

    if pages.read == 0 {
        return Err(Error::process_pdf(
            document,
            format!("none of {} pages could be read", pages.failed),
        ));
    }

    let candidates: Vec<OutlineItem> = pages
        .results
        .into_iter()
        .flat_map(|(_, items)| items)
        .collect();
    log::debug!("{}: {} heading candidates", document, candidates.len());

    let title = document_title(document, decoder.metadata_title().as_deref());
    let outline = assemble_outline(title, candidates);

    progress.emit(Progress::Finished {
        documents: 1,
        pages: pages.read,
    });
    log::info!(
        "Extracted {} headings from {} ({} of {} pages read)",
        outline.len(),
        document,
        pages.read,
        scanned
    );
    Ok(outline)
}

/// Deduplicate heading candidates by `(text, page)` and sort them by page.
///
/// The first occurrence of a duplicate wins; items on the same page keep
/// their discovery order.
pub fn assemble_outline(
    title: impl Into<String>,
    candidates: impl IntoIterator<Item = OutlineItem>,
) -> PdfOutline {
    let mut seen = HashSet::new();
    let mut outline: Vec<OutlineItem> = candidates
        .into_iter()
        .filter(|item| seen.insert((item.text.clone(), item.page)))
        .collect();
    outline.sort_by_key(|item| item.page);

    PdfOutline {
        title: title.into(),
        outline,
    }
}
