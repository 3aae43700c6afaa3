//! Heading detection from glyph heights.
//!
//! PDFs rarely carry semantic heading markup, so headings are inferred from
//! rendered glyph size: spans on a page are clustered by rounded height and
//! the largest clusters are promoted to heading levels.

use std::collections::{BTreeMap, HashMap};

use crate::model::{HeadingLevel, OutlineItem, TextSpan};

use super::config::AnalysisConfig;

/// Span texts of one page grouped by rounded height.
#[derive(Debug, Clone, Default)]
pub struct FontSizeClusters {
    clusters: BTreeMap<i64, Vec<String>>,
}

impl FontSizeClusters {
    /// Cluster the non-blank spans of one page.
    pub fn from_spans(spans: &[TextSpan]) -> Self {
        let mut clusters: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for span in spans {
            let text = span.text.trim();
            if text.is_empty() {
                continue;
            }
            if let Some(height) = span.rounded_height() {
                clusters.entry(height).or_default().push(text.to_string());
            }
        }
        Self { clusters }
    }

    /// Distinct heights, largest first.
    pub fn heights_desc(&self) -> Vec<i64> {
        self.clusters.keys().rev().copied().collect()
    }

    /// Texts sharing a rounded height, in span order.
    pub fn texts(&self, height: i64) -> &[String] {
        self.clusters.get(&height).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Heading level of each of the `k` largest heights.
    pub fn levels(&self, k: usize) -> HashMap<i64, HeadingLevel> {
        self.clusters
            .keys()
            .rev()
            .take(k)
            .enumerate()
            .map(|(rank, &height)| (height, HeadingLevel::from_rank(rank)))
            .collect()
    }

    /// Get the number of distinct heights.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Check if the page had no usable spans.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

/// Promotes large-glyph spans to outline headings.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    clusters: usize,
    min_len: usize,
    max_len: usize,
    reject_periods: bool,
}

impl HeadingClassifier {
    /// Create a classifier from analysis options.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            clusters: config.heading_clusters,
            min_len: config.heading_min_len,
            max_len: config.heading_max_len,
            reject_periods: config.reject_heading_periods,
        }
    }

    /// Heading candidates of one page, in span order.
    ///
    /// Candidates are not deduplicated; that happens across pages.
    pub fn classify_page(&self, spans: &[TextSpan], page: u32) -> Vec<OutlineItem> {
        let levels = FontSizeClusters::from_spans(spans).levels(self.clusters);
        if levels.is_empty() {
            return Vec::new();
        }

        spans
            .iter()
            .filter_map(|span| {
                let level = *levels.get(&span.rounded_height()?)?;
                let text = span.text.trim();
                self.is_heading_text(text)
                    .then(|| OutlineItem::new(level, text, page))
            })
            .collect()
    }

    /// Check the shape of a trimmed heading candidate.
    pub fn is_heading_text(&self, text: &str) -> bool {
        let len = text.chars().count();
        if len <= self.min_len || len >= self.max_len {
            return false;
        }

        if !text.chars().next().is_some_and(char::is_uppercase) {
            return false;
        }

        !(self.reject_periods && text.contains('.'))
    }
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// Height statistics over a whole document.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    /// Span count per rounded height
    pub histogram: BTreeMap<i64, usize>,
}

impl FontStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one span. Blank spans and unusable heights are ignored.
    pub fn add_span(&mut self, span: &TextSpan) {
        if span.is_blank() {
            return;
        }
        if let Some(height) = span.rounded_height() {
            *self.histogram.entry(height).or_insert(0) += 1;
        }
    }

    /// Record every span of a page.
    pub fn add_spans(&mut self, spans: &[TextSpan]) {
        for span in spans {
            self.add_span(span);
        }
    }

    /// Number of spans recorded.
    pub fn span_count(&self) -> usize {
        self.histogram.values().sum()
    }

    /// Most frequent height (body text). Ties go to the smaller height.
    pub fn body_height(&self) -> Option<i64> {
        let mut best: Option<(i64, usize)> = None;
        for (&height, &count) in &self.histogram {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((height, count));
            }
        }
        best.map(|(height, _)| height)
    }

    /// Distinct heights, largest first.
    pub fn heights_desc(&self) -> Vec<i64> {
        self.histogram.keys().rev().copied().collect()
    }

    /// Heights larger than body text, largest first.
    pub fn heading_heights(&self) -> Vec<i64> {
        match self.body_height() {
            Some(body) => self
                .histogram
                .keys()
                .rev()
                .copied()
                .filter(|&h| h > body)
                .collect(),
            None => Vec::new(),
        }
    }
}
