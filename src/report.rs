//! Derived artifacts: metadata stream and aggregate report.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{AggregateCounts, Category, ContentRecord, ParseOutcome, ReportStatus};
use crate::writer::JsonlWriter;

/// Content-count threshold the report verdict defaults to.
pub const DEFAULT_REPORT_THRESHOLD: usize = 1000;

/// One metadata line, derived from a content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataLine {
    pub doc_title: String,
    pub section_id: String,
    pub page: usize,
    #[serde(rename = "type")]
    pub category: Category,
    pub word_count: usize,
    pub char_count: usize,
}

impl MetadataLine {
    pub fn from_record(record: &ContentRecord) -> Self {
        Self {
            doc_title: record.doc_title.clone(),
            section_id: record.section_id.clone(),
            page: record.page,
            category: record.category,
            word_count: record.word_count(),
            char_count: record.char_count(),
        }
    }
}

/// Aggregate report persisted as pretty JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    #[serde(flatten)]
    pub counts: AggregateCounts,
    pub status: ReportStatus,
}

impl Report {
    pub fn from_outcome(outcome: &ParseOutcome, threshold: usize) -> Self {
        let counts = outcome.counts();
        Self {
            status: counts.status(threshold),
            counts,
        }
    }
}

/// Writes the per-record metadata stream as JSONL.
pub fn write_metadata<P: AsRef<Path>>(records: &[ContentRecord], dest: P) -> Result<()> {
    let lines: Vec<MetadataLine> = records.iter().map(MetadataLine::from_record).collect();
    JsonlWriter::new().write(&lines, dest)
}

/// Writes the aggregate report as pretty JSON.
pub fn write_report<P: AsRef<Path>>(report: &Report, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(dest, json)?;
    Ok(())
}
