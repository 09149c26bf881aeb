//! Record model for the extracted corpus.
//!
//! These types are the serialization contract of the two output streams:
//! a hierarchical TOC stream and a flat, classified content stream. Both
//! are persisted as line-delimited JSON and are immutable after creation.

mod content;
mod result;
mod toc;

pub use content::{Category, ContentRecord};
pub use result::{AggregateCounts, ParseOutcome, ReportStatus};
pub use toc::{OutlineNode, TocEntry};
