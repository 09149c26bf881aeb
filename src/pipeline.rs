//! Extraction pipeline: modes, options, orchestration.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::extract::{
    ContentExtractor, TocStrategy, DEFAULT_MIN_TEXT_LEN, DEFAULT_TITLE_MAX_LEN,
};
use crate::model::{ContentRecord, ParseOutcome};
use crate::report::{self, Report, DEFAULT_REPORT_THRESHOLD};
use crate::source::{DocumentSource, PdfSource};
use crate::writer::JsonlWriter;

/// How much of the document the content pass covers.
///
/// The cap applies to content extraction only; TOC extraction always
/// sees the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionMode {
    /// Every page.
    #[default]
    Full,
    /// First 600 pages.
    Extended,
    /// First 200 pages.
    Standard,
}

impl ExtractionMode {
    /// Content page cap, `None` for unbounded.
    pub fn page_cap(&self) -> Option<usize> {
        match self {
            ExtractionMode::Full => None,
            ExtractionMode::Extended => Some(600),
            ExtractionMode::Standard => Some(200),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Full => "full",
            ExtractionMode::Extended => "extended",
            ExtractionMode::Standard => "standard",
        }
    }
}

impl std::str::FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(ExtractionMode::Full),
            "extended" => Ok(ExtractionMode::Extended),
            "standard" => Ok(ExtractionMode::Standard),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Overrides the document's own title when set.
    pub doc_title: Option<String>,
    pub mode: ExtractionMode,
    pub output_dir: PathBuf,
    pub toc_file: String,
    pub content_file: String,
    pub metadata_file: String,
    pub report_file: String,
    pub title_max_len: usize,
    pub min_text_len: usize,
    pub report_threshold: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            doc_title: None,
            mode: ExtractionMode::Full,
            output_dir: PathBuf::from("output"),
            toc_file: "toc.jsonl".to_string(),
            content_file: "content.jsonl".to_string(),
            metadata_file: "metadata.jsonl".to_string(),
            report_file: "report.json".to_string(),
            title_max_len: DEFAULT_TITLE_MAX_LEN,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            report_threshold: DEFAULT_REPORT_THRESHOLD,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc_title(mut self, title: impl Into<String>) -> Self {
        self.doc_title = Some(title.into());
        self
    }

    pub fn with_mode(mut self, mode: ExtractionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_title_max_len(mut self, len: usize) -> Self {
        self.title_max_len = len;
        self
    }

    pub fn with_min_text_len(mut self, len: usize) -> Self {
        self.min_text_len = len;
        self
    }

    pub fn with_report_threshold(mut self, threshold: usize) -> Self {
        self.report_threshold = threshold;
        self
    }
}

/// Everything a pipeline run produced and persisted.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub outcome: ParseOutcome,
    pub report: Report,
}

/// Runs the fixed extraction sequence against one document.
///
/// A page-level extraction failure is logged and yields zero records
/// for that page; the run continues. Each run builds its own
/// extractor instances, so nothing is shared across runs.
pub struct ExtractionPipeline {
    options: PipelineOptions,
}

impl ExtractionPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Opens a PDF at `input` and runs against it.
    pub fn run<P: AsRef<Path>>(&self, input: P) -> Result<PipelineOutput> {
        let source = PdfSource::open(input)?;
        self.run_with_source(&source)
    }

    /// Runs against any [`DocumentSource`].
    pub fn run_with_source(&self, source: &dyn DocumentSource) -> Result<PipelineOutput> {
        let doc_title = self
            .options
            .doc_title
            .clone()
            .unwrap_or_else(|| source.doc_title());

        log::info!(
            "extracting \"{}\" ({} pages, mode {})",
            doc_title,
            source.page_count(),
            self.options.mode.as_str()
        );

        let toc_entries = TocStrategy::new().extract(&doc_title, source);
        let content_items = self.extract_content(&doc_title, source);
        let outcome = ParseOutcome::new(toc_entries, content_items);

        let report = self.persist(&outcome)?;
        source.clear_cache();

        log::info!(
            "done: {} toc entries, {} content items, status {}",
            outcome.toc_entries.len(),
            outcome.content_items.len(),
            report.status
        );
        Ok(PipelineOutput { outcome, report })
    }

    fn extract_content(&self, doc_title: &str, source: &dyn DocumentSource) -> Vec<ContentRecord> {
        let extractor = ContentExtractor::new()
            .with_title_max_len(self.options.title_max_len)
            .with_min_text_len(self.options.min_text_len);

        let pages = source.page_count();
        let limit = match self.options.mode.page_cap() {
            Some(cap) => cap.min(pages),
            None => pages,
        };

        let mut records = Vec::new();
        for page in 1..=limit {
            match source.page_blocks(page) {
                Ok(blocks) => {
                    records.extend(extractor.extract_page(doc_title, page, &blocks));
                }
                Err(err) => {
                    log::warn!("page {} yielded no content: {}", page, err);
                }
            }
        }
        records
    }

    fn persist(&self, outcome: &ParseOutcome) -> Result<Report> {
        let dir = &self.options.output_dir;
        let writer = JsonlWriter::new();

        writer.write(&outcome.toc_entries, dir.join(&self.options.toc_file))?;
        writer.write(&outcome.content_items, dir.join(&self.options.content_file))?;
        report::write_metadata(&outcome.content_items, dir.join(&self.options.metadata_file))?;

        let report = Report::from_outcome(outcome, self.options.report_threshold);
        report::write_report(&report, dir.join(&self.options.report_file))?;
        Ok(report)
    }
}
