//! Integration tests for the in-progress guard, the worker pool and the
//! async entry points.

mod common;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};

use common::{document, page, FlakySource, JOB, NEUTRAL, PERSONA, REVENUE};
use pdflens::{
    progress_channel, AnalysisConfig, Analyzer, DecodeError, DocumentSource, Error,
    MemoryDocument, PdfDecoder, Preset, Progress, TextSpan,
};

/// Source whose `open` blocks until released.
struct GatedSource {
    inner: MemoryDocument,
    opened: Sender<()>,
    release: Receiver<()>,
}

impl DocumentSource for GatedSource {
    fn filename(&self) -> &str {
        self.inner.filename()
    }

    fn open(&self) -> Result<Box<dyn PdfDecoder>, DecodeError> {
        let _ = self.opened.send(());
        let _ = self.release.recv();
        self.inner.open()
    }
}

/// Source whose pages panic.
struct PanickingSource;

struct PanickingDecoder;

impl PdfDecoder for PanickingDecoder {
    fn page_count(&self) -> u32 {
        1
    }

    fn text_spans(&self, _page: u32) -> Result<Vec<TextSpan>, DecodeError> {
        panic!("decoder bug");
    }

    fn metadata_title(&self) -> Option<String> {
        None
    }
}

impl DocumentSource for PanickingSource {
    fn filename(&self) -> &str {
        "panic.pdf"
    }

    fn open(&self) -> Result<Box<dyn PdfDecoder>, DecodeError> {
        Ok(Box::new(PanickingDecoder))
    }
}

fn guide() -> MemoryDocument {
    MemoryDocument::from_spans(
        "guide.pdf",
        vec![
            TextSpan::new("Introduction", 18.0, 1),
            TextSpan::new("This is body text.", 10.0, 1),
        ],
    )
}

fn wait_until(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out");
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_second_call_rejected_while_running() {
    let analyzer = Analyzer::new();
    let (opened_tx, opened_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);
    let gated = GatedSource {
        inner: guide(),
        opened: opened_tx,
        release: release_rx,
    };

    let running = analyzer.clone();
    let handle = thread::spawn(move || running.extract_outline(&gated));

    opened_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(analyzer.is_in_progress());
    assert!(matches!(
        analyzer.extract_outline(&guide()),
        Err(Error::AnalysisInProgress)
    ));
    let docs: Vec<Arc<dyn DocumentSource>> = vec![Arc::new(guide())];
    assert!(matches!(
        analyzer.analyze_for_persona(&docs, PERSONA, JOB),
        Err(Error::AnalysisInProgress)
    ));

    release_tx.send(()).unwrap();
    let outline = handle.join().unwrap().unwrap();
    assert_eq!(outline.len(), 1);

    wait_until(|| !analyzer.is_in_progress());
    assert!(analyzer.extract_outline(&guide()).is_ok());
}

#[test]
fn test_separate_analyzers_run_independently() {
    let first = Analyzer::new();
    let second = Analyzer::new();
    let (opened_tx, opened_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);
    let gated = GatedSource {
        inner: guide(),
        opened: opened_tx,
        release: release_rx,
    };

    let running = first.clone();
    let handle = thread::spawn(move || running.extract_outline(&gated));
    opened_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    assert!(second.extract_outline(&guide()).is_ok());

    release_tx.send(()).unwrap();
    assert!(handle.join().unwrap().is_ok());
}

#[test]
fn test_flag_released_after_panic() {
    let analyzer = Analyzer::new();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        analyzer.extract_outline(&PanickingSource)
    }));
    assert!(result.is_err());
    assert!(!analyzer.is_in_progress());
}

#[test]
fn test_progress_events() {
    let (tx, rx) = progress_channel();
    let spans = [
        page(1, &[REVENUE, NEUTRAL]),
        page(2, &[REVENUE]),
        page(3, &[NEUTRAL, REVENUE]),
    ]
    .concat();
    let docs: Vec<Arc<dyn DocumentSource>> = vec![
        Arc::new(FlakySource::new("flaky.pdf", spans).failing_pages(&[2])),
        Arc::new(FlakySource::new("gone.pdf", Vec::new()).unopenable()),
    ];

    let analyzer = Analyzer::new().with_progress(tx);
    analyzer.analyze_for_persona(&docs, PERSONA, JOB).unwrap();
    drop(analyzer);

    let events: Vec<Progress> = rx.iter().collect();
    assert_eq!(
        events.first(),
        Some(&Progress::DocumentStarted {
            document: "flaky.pdf".into(),
            pages: 3
        })
    );
    let done = events
        .iter()
        .filter(|e| matches!(e, Progress::PageDone { .. }))
        .count();
    assert_eq!(done, 2);
    assert!(events.contains(&Progress::PageSkipped {
        document: "flaky.pdf".into(),
        page: 2,
        reason: "Cannot extract text from page 2: corrupt content stream".into(),
    }));
    assert!(events
        .iter()
        .any(|e| matches!(e, Progress::DocumentSkipped { document, .. } if document == "gone.pdf")));
    assert_eq!(
        events.last(),
        Some(&Progress::Finished {
            documents: 1,
            pages: 2
        })
    );
}

#[test]
fn test_parallel_results_match_sequential() {
    let docs: Vec<Arc<dyn DocumentSource>> = (0..6)
        .map(|i| {
            let paragraphs: &[&str] = if i % 2 == 0 {
                &[REVENUE, NEUTRAL]
            } else {
                &[NEUTRAL, REVENUE, REVENUE]
            };
            Arc::new(document(&format!("doc{}.pdf", i), 8, paragraphs)) as Arc<dyn DocumentSource>
        })
        .collect();

    let config = AnalysisConfig::concurrent().with_max_workers(4);
    let sequential = Analyzer::new()
        .with_config(config.clone().sequential())
        .analyze_for_persona(&docs, PERSONA, JOB)
        .unwrap();

    for _ in 0..5 {
        let parallel = Analyzer::new()
            .with_config(config.clone())
            .analyze_for_persona(&docs, PERSONA, JOB)
            .unwrap();
        assert_eq!(parallel.extracted_sections, sequential.extracted_sections);
        assert_eq!(parallel.sub_section_analysis, sequential.sub_section_analysis);
        assert_eq!(parallel.metadata.documents, sequential.metadata.documents);
    }
}

#[tokio::test]
async fn test_async_outline() {
    let analyzer = Analyzer::new();
    let outline = analyzer
        .extract_outline_async(Arc::new(guide()))
        .await
        .unwrap();
    assert_eq!(outline.title, "guide");
    assert_eq!(outline.len(), 1);
    assert!(!analyzer.is_in_progress());
}

#[tokio::test]
async fn test_async_persona() {
    let analyzer = Analyzer::new().with_preset(Preset::Concurrent);
    let docs: Vec<Arc<dyn DocumentSource>> =
        vec![Arc::new(document("q1.pdf", 2, &[REVENUE, NEUTRAL]))];
    let analysis = analyzer
        .analyze_for_persona_async(docs, PERSONA.to_string(), JOB.to_string())
        .await
        .unwrap();
    assert_eq!(analysis.extracted_sections.len(), 2);
}

#[tokio::test]
async fn test_async_rejected_while_running() {
    let analyzer = Analyzer::new();
    let (opened_tx, opened_rx) = bounded(1);
    let (release_tx, release_rx) = bounded(1);
    let gated: Arc<dyn DocumentSource> = Arc::new(GatedSource {
        inner: guide(),
        opened: opened_tx,
        release: release_rx,
    });

    let running = analyzer.clone();
    let task = tokio::spawn(async move { running.extract_outline_async(gated).await });

    tokio::task::spawn_blocking(move || opened_rx.recv_timeout(Duration::from_secs(5)))
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(
        analyzer.extract_outline_async(Arc::new(guide())).await,
        Err(Error::AnalysisInProgress)
    ));

    release_tx.send(()).unwrap();
    assert!(task.await.unwrap().is_ok());
    assert!(!analyzer.is_in_progress());
}
