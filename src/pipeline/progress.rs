//! Progress events for long-running analyses.

use crossbeam_channel::{Receiver, Sender};

/// One step of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A document was opened; `pages` will be scanned.
    DocumentStarted { document: String, pages: u32 },
    /// A page was analyzed.
    PageDone { document: String, page: u32 },
    /// A page could not be read and was skipped.
    PageSkipped {
        document: String,
        page: u32,
        reason: String,
    },
    /// A document could not be opened and was skipped.
    DocumentSkipped { document: String, reason: String },
    /// The run completed.
    Finished { documents: usize, pages: usize },
}

/// Optional destination for progress events.
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<Sender<Progress>>,
}

impl ProgressSink {
    /// Create a sink sending to `tx`, or discarding events when `None`.
    pub fn new(tx: Option<Sender<Progress>>) -> Self {
        Self { tx }
    }

    /// Send an event. A receiver that went away is not an error.
    pub fn emit(&self, event: Progress) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}

/// Create an unbounded progress channel.
pub fn progress_channel() -> (Sender<Progress>, Receiver<Progress>) {
    crossbeam_channel::unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_to_channel() {
        let (tx, rx) = progress_channel();
        let sink = ProgressSink::new(Some(tx));
        sink.emit(Progress::Finished {
            documents: 1,
            pages: 2,
        });
        assert_eq!(
            rx.try_recv().unwrap(),
            Progress::Finished {
                documents: 1,
                pages: 2
            }
        );
    }

    #[test]
    fn test_emit_without_receiver() {
        let (tx, rx) = progress_channel();
        drop(rx);
        let sink = ProgressSink::new(Some(tx));
        sink.emit(Progress::PageDone {
            document: "a.pdf".into(),
            page: 1,
        });
        ProgressSink::default().emit(Progress::Finished {
            documents: 0,
            pages: 0,
        });
    }
}
