//! Persona path: sections of many documents ranked for a reader and task.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::analysis::{AnalysisConfig, RelevanceQuery, RelevanceScorer, SectionSegmenter};
use crate::decoder::DocumentSource;
use crate::error::{Error, Result};
use crate::model::{
    importance_rank, page_text, AnalysisMetadata, ExtractedSection, PersonaAnalysis,
    SubSectionAnalysis, TextSpan,
};

use super::{for_each_page, Progress, ProgressSink, WorkerPool};

/// A sub-section excerpt with the score of its best sentence.
#[derive(Debug, Clone)]
struct Excerpt {
    best: f64,
    analysis: SubSectionAnalysis,
}

/// Qualifying sections and excerpts, in discovery order.
#[derive(Debug, Default)]
struct Findings {
    sections: Vec<ExtractedSection>,
    excerpts: Vec<Excerpt>,
}

impl Findings {
    fn extend(&mut self, other: Findings) {
        self.sections.extend(other.sections);
        self.excerpts.extend(other.excerpts);
    }
}

/// Findings of one opened document.
#[derive(Debug)]
struct DocumentFindings {
    pages_read: usize,
    findings: Findings,
}

/// Scoring state shared by every page of a run.
struct PageAnalyzer<'a> {
    config: &'a AnalysisConfig,
    scorer: RelevanceScorer,
    segmenter: SectionSegmenter,
    query: RelevanceQuery,
}

impl<'a> PageAnalyzer<'a> {
    fn new(config: &'a AnalysisConfig, persona: &str, job: &str) -> Self {
        let scorer = RelevanceScorer::new(config.weights.clone());
        let query = scorer.query(persona, job);
        Self {
            config,
            scorer,
            segmenter: SectionSegmenter::new(config),
            query,
        }
    }

    /// Segment and score one page.
    fn analyze_page(&self, document: &str, page: u32, spans: &[TextSpan]) -> Findings {
        let mut findings = Findings::default();

        for section in self.segmenter.segment(&page_text(spans)) {
            let score = self.scorer.score_query(&section.text, &self.query);
            if score <= self.config.section_threshold {
                continue;
            }

            if let Some((best, refined_text)) = self.refine(&section.text) {
                findings.excerpts.push(Excerpt {
                    best,
                    analysis: SubSectionAnalysis {
                        document: document.to_string(),
                        refined_text,
                        page_number: page,
                    },
                });
            }

            findings.sections.push(ExtractedSection {
                document: document.to_string(),
                page_number: page,
                section_title: section.title,
                importance_rank: importance_rank(score),
            });
        }

        findings
    }

    /// Join the best-scoring sentences of a section.
    ///
    /// Returns the best sentence score with the excerpt, or `None` when no
    /// sentence clears the sentence threshold.
    fn refine(&self, text: &str) -> Option<(f64, String)> {
        let mut scored: Vec<(f64, &str)> = self
            .segmenter
            .split_sentences(text)
            .into_iter()
            .filter(|s| s.chars().count() > self.config.min_sentence_len)
            .map(|s| (self.scorer.score_query(s, &self.query), s))
            .filter(|(score, _)| *score > self.config.sentence_threshold)
            .collect();

        if scored.is_empty() {
            return None;
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.excerpt_sentences);

        let best = scored[0].0;
        let sentences: Vec<&str> = scored.into_iter().map(|(_, s)| s).collect();
        Some((best, format!("{}.", sentences.join(". "))))
    }
}

/// Rank sections of `sources` for a persona and a job-to-be-done.
///
/// Unreadable documents and pages are skipped. The call fails only when no
/// document yields a single readable page.
pub fn run(
    sources: &[Arc<dyn DocumentSource>],
    persona: &str,
    job: &str,
    config: &AnalysisConfig,
    pool: &WorkerPool,
    progress: &ProgressSink,
) -> Result<PersonaAnalysis> {
    if sources.is_empty() {
        return Err(Error::AnalyzeDocuments("no documents given".into()));
    }

    let selected = match config.max_documents {
        Some(max) if sources.len() > max => {
            log::warn!(
                "Analyzing the first {} of {} documents",
                max,
                sources.len()
            );
            &sources[..max]
        }
        _ => sources,
    };

    let analyzer = PageAnalyzer::new(config, persona, job);
    if analyzer.query.is_empty() {
        log::warn!("Persona and job produced no keywords; only vocabulary can score");
    }

    let outcomes = pool.map(selected, |source| {
        analyze_document(source.as_ref(), &analyzer, pool, progress)
    });

    let mut findings = Findings::default();
    let mut documents_read = 0;
    let mut pages_read = 0;
    for outcome in outcomes.into_iter().flatten() {
        if outcome.pages_read > 0 {
            documents_read += 1;
        }
        pages_read += outcome.pages_read;
        findings.extend(outcome.findings);
    }

    if documents_read == 0 {
        return Err(Error::AnalyzeDocuments(format!(
            "none of {} documents had a readable page",
            selected.len()
        )));
    }

    let candidates = (findings.sections.len(), findings.excerpts.len());
    let (extracted_sections, sub_section_analysis) = rank(findings, config);

    progress.emit(Progress::Finished {
        documents: documents_read,
        pages: pages_read,
    });
    log::info!(
        "Ranked {} sections and {} excerpts from {} candidates across {} documents",
        extracted_sections.len(),
        sub_section_analysis.len(),
        candidates.0 + candidates.1,
        documents_read
    );

    Ok(PersonaAnalysis {
        metadata: AnalysisMetadata::new(
            selected.iter().map(|source| source.filename()),
            persona,
            job,
        ),
        extracted_sections,
        sub_section_analysis,
    })
}

/// Scan the pages of one document. `None` when it cannot be opened.
fn analyze_document(
    source: &dyn DocumentSource,
    analyzer: &PageAnalyzer<'_>,
    pool: &WorkerPool,
    progress: &ProgressSink,
) -> Option<DocumentFindings> {
    let document = source.filename();
    let decoder = match source.open() {
        Ok(decoder) => decoder,
        Err(e) => {
            log::warn!("Skipping document {}: {}", document, e);
            progress.emit(Progress::DocumentSkipped {
                document: document.to_string(),
                reason: e.to_string(),
            });
            return None;
        }
    };

    let max_pages = analyzer.config.persona_max_pages;
    progress.emit(Progress::DocumentStarted {
        document: document.to_string(),
        pages: decoder.page_count().min(max_pages),
    });

    let pages = for_each_page(
        decoder.as_ref(),
        document,
        max_pages,
        pool,
        progress,
        |page, spans| analyzer.analyze_page(document, page, spans),
    );

    if pages.read == 0 {
        log::warn!("Skipping document {}: no readable pages", document);
        progress.emit(Progress::DocumentSkipped {
            document: document.to_string(),
            reason: "no readable pages".into(),
        });
    }

    let mut findings = Findings::default();
    for (_, page_findings) in pages.results {
        findings.extend(page_findings);
    }
    log::debug!(
        "{}: {} qualifying sections, {} excerpts",
        document,
        findings.sections.len(),
        findings.excerpts.len()
    );

    Some(DocumentFindings {
        pages_read: pages.read,
        findings,
    })
}

/// Sort pooled findings and apply the result caps.
///
/// Both sorts are stable, so ties keep discovery order.
fn rank(
    findings: Findings,
    config: &AnalysisConfig,
) -> (Vec<ExtractedSection>, Vec<SubSectionAnalysis>) {
    let Findings {
        mut sections,
        mut excerpts,
    } = findings;

    sections.sort_by(|a, b| b.importance_rank.cmp(&a.importance_rank));
    sections.truncate(config.max_sections);

    excerpts.sort_by(|a, b| b.best.partial_cmp(&a.best).unwrap_or(Ordering::Equal));
    excerpts.truncate(config.max_subsections);

    (
        sections,
        excerpts.into_iter().map(|e| e.analysis).collect(),
    )
}
