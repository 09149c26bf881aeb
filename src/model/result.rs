//! Run outcome and aggregate reporting types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Category, ContentRecord, TocEntry};

/// Everything a single extraction run produced, before persistence.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub toc_entries: Vec<TocEntry>,
    pub content_items: Vec<ContentRecord>,
}

impl ParseOutcome {
    pub fn new(toc_entries: Vec<TocEntry>, content_items: Vec<ContentRecord>) -> Self {
        Self {
            toc_entries,
            content_items,
        }
    }

    /// Aggregate counts over both streams.
    pub fn counts(&self) -> AggregateCounts {
        let pages: HashSet<usize> = self.content_items.iter().map(|r| r.page).collect();
        let by_category = |cat: Category| {
            self.content_items
                .iter()
                .filter(|r| r.category == cat)
                .count()
        };
        AggregateCounts {
            pages: pages.len(),
            content_items: self.content_items.len(),
            toc_entries: self.toc_entries.len(),
            major_sections: by_category(Category::MajorSection),
            paragraphs: by_category(Category::Paragraph),
        }
    }
}

/// Counts reported at the end of a run.
///
/// `pages` is the number of distinct pages that yielded at least one
/// content record, not the document's page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    pub pages: usize,
    pub content_items: usize,
    pub toc_entries: usize,
    pub major_sections: usize,
    pub paragraphs: usize,
}

impl AggregateCounts {
    /// PASS when the content stream exceeds `threshold` records.
    pub fn status(&self, threshold: usize) -> ReportStatus {
        if self.content_items > threshold {
            ReportStatus::Pass
        } else {
            ReportStatus::Fail
        }
    }
}

/// Coarse verdict of a run, derived from the content count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReportStatus {
    Pass,
    Fail,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pass => "PASS",
            ReportStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
