//! Aggregation and ranking pipeline.
//!
//! Both analysis paths fan pages (and, for personas, documents) out over a
//! [`WorkerPool`], join every result, and only then sort and cap. Work
//! items never see each other's output.

pub mod outline;
pub mod persona;
mod pool;
mod progress;
mod session;

pub use outline::assemble_outline;
pub use pool::WorkerPool;
pub use progress::{progress_channel, Progress, ProgressSink};
pub use session::{InFlight, InProgress};

use crate::analysis::normalize_spans;
use crate::decoder::PdfDecoder;
use crate::model::TextSpan;

/// Outcome of scanning the pages of one document.
#[derive(Debug)]
pub(crate) struct PageRun<T> {
    /// Per-page results of readable pages, in page order
    pub results: Vec<(u32, T)>,
    /// Pages read successfully
    pub read: usize,
    /// Pages skipped after a decoder failure
    pub failed: usize,
}

/// Apply `f` to the normalized spans of the first `max_pages` pages.
///
/// Pages the decoder fails on are logged and skipped.
pub(crate) fn for_each_page<T, F>(
    decoder: &dyn PdfDecoder,
    document: &str,
    max_pages: u32,
    pool: &WorkerPool,
    progress: &ProgressSink,
    f: F,
) -> PageRun<T>
where
    T: Send,
    F: Fn(u32, &[TextSpan]) -> T + Sync + Send,
{
    let pages: Vec<u32> = (1..=decoder.page_count().min(max_pages)).collect();

    let outcomes = pool.map(&pages, |&page| match decoder.text_spans(page) {
        Ok(mut spans) => {
            normalize_spans(&mut spans);
            let result = f(page, &spans);
            progress.emit(Progress::PageDone {
                document: document.to_string(),
                page,
            });
            Some(result)
        }
        Err(e) => {
            log::warn!("Skipping page {} of {}: {}", page, document, e);
            progress.emit(Progress::PageSkipped {
                document: document.to_string(),
                page,
                reason: e.to_string(),
            });
            None
        }
    });

    let mut run = PageRun {
        results: Vec::with_capacity(outcomes.len()),
        read: 0,
        failed: 0,
    };
    for (page, outcome) in pages.into_iter().zip(outcomes) {
        match outcome {
            Some(result) => {
                run.read += 1;
                run.results.push((page, result));
            }
            None => run.failed += 1,
        }
    }
    run
}
