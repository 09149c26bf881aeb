//! TOC-stream record types.

use serde::{Deserialize, Serialize};

/// One node of a document's embedded navigation tree, flattened to
/// source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Nesting depth, 1 = top level.
    pub level: u32,
    pub title: String,
    /// Destination page, 1-based.
    pub page: usize,
}

impl OutlineNode {
    pub fn new(level: u32, title: impl Into<String>, page: usize) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

/// One entry of the TOC stream.
///
/// `parent_id`, when present, references the `section_id` of an entry
/// constructed earlier in the same run, never a later one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocEntry {
    pub doc_title: String,
    pub section_id: String,
    pub title: String,
    pub full_path: String,
    /// 1-based page number.
    pub page: usize,
    /// Hierarchy depth, >= 1. For numeric dotted ids this equals
    /// dot-count + 1.
    pub level: u32,
    pub parent_id: Option<String>,
    /// Reserved; currently always empty.
    pub tags: Vec<String>,
}

impl TocEntry {
    pub fn is_top_level(&self) -> bool {
        self.level == 1
    }

    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some()
    }
}
