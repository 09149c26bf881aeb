//! # doccorpus
//!
//! Structured corpus extraction from paginated PDF documents.
//!
//! The pipeline turns one PDF into two line-delimited JSON streams: a
//! hierarchical table of contents and a flat sequence of classified
//! content records, plus a derived metadata stream and an aggregate
//! report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use doccorpus::{ExtractionMode, ExtractionPipeline, PipelineOptions};
//!
//! fn main() -> doccorpus::Result<()> {
//!     let options = PipelineOptions::new()
//!         .with_mode(ExtractionMode::Standard)
//!         .with_output_dir("output");
//!     let output = ExtractionPipeline::new(options).run("spec.pdf")?;
//!     println!(
//!         "{} sections, {} content items, {}",
//!         output.outcome.toc_entries.len(),
//!         output.outcome.content_items.len(),
//!         output.report.status
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two TOC strategies**: embedded outline, with a dotted-leader
//!   pattern scan of early pages as fallback
//! - **Rule-based classification**: fixed, ordered category table
//! - **Fault tolerance**: a failing page logs a warning and yields
//!   nothing instead of aborting the run
//! - **Injectable sources**: the pipeline runs against any
//!   [`DocumentSource`], not just PDF files

pub mod classify;
pub mod error;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod writer;

// Re-export commonly used types
pub use classify::Classifier;
pub use error::{Error, Result};
pub use extract::{ContentExtractor, OutlineTocExtractor, PatternTocExtractor, TocStrategy};
pub use model::{
    AggregateCounts, Category, ContentRecord, OutlineNode, ParseOutcome, ReportStatus, TocEntry,
};
pub use pipeline::{ExtractionMode, ExtractionPipeline, PipelineOptions, PipelineOutput};
pub use report::{MetadataLine, Report};
pub use source::{DocumentSource, PdfSource, RawBlock, RawLine, RawSpan};
pub use writer::{read_jsonl, JsonlWriter};

use std::path::Path;

/// Extract a PDF with default options, writing all artifacts to
/// `output_dir`.
///
/// # Example
///
/// ```no_run
/// let output = doccorpus::extract_file("document.pdf", "output").unwrap();
/// println!("{} items", output.outcome.content_items.len());
/// ```
pub fn extract_file<P: AsRef<Path>, Q: Into<std::path::PathBuf>>(
    input: P,
    output_dir: Q,
) -> Result<PipelineOutput> {
    let options = PipelineOptions::new().with_output_dir(output_dir);
    ExtractionPipeline::new(options).run(input)
}

/// Extract only the table of contents from a PDF, without writing
/// anything.
pub fn extract_toc<P: AsRef<Path>>(input: P) -> Result<Vec<TocEntry>> {
    let source = PdfSource::open(input)?;
    let entries = TocStrategy::new().extract(&source.doc_title(), &source);
    source.clear_cache();
    Ok(entries)
}
