//! Document source abstraction.
//!
//! [`DocumentSource`] is the seam between the extraction pipeline and a
//! concrete document engine. The shipped implementation is
//! [`PdfSource`]; tests inject in-memory sources through the same
//! trait.

mod pdf;

pub use pdf::PdfSource;

use crate::error::Result;
use crate::model::OutlineNode;

/// A run of text sharing one style inside a line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSpan {
    pub text: String,
}

impl RawSpan {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One visual line of a block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawLine {
    pub spans: Vec<RawSpan>,
}

impl RawLine {
    pub fn new(spans: Vec<RawSpan>) -> Self {
        Self { spans }
    }

    /// Single-span convenience constructor.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            spans: vec![RawSpan::new(text)],
        }
    }
}

/// A positioned block of text on a page, in reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBlock {
    /// Block position within its page, 0-based.
    pub index: usize,
    /// Bounding box (x0, y0, x1, y1) or empty when the engine does not
    /// report geometry.
    pub bbox: Vec<f64>,
    pub lines: Vec<RawLine>,
}

impl RawBlock {
    pub fn new(index: usize, lines: Vec<RawLine>) -> Self {
        Self {
            index,
            bbox: Vec::new(),
            lines,
        }
    }

    /// Concatenates span texts in line order, then span order, with no
    /// separator. Callers normalize the result themselves.
    pub fn assemble(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            for span in &line.spans {
                text.push_str(&span.text);
            }
        }
        text
    }

    /// True when at least one span carries non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.lines
            .iter()
            .flat_map(|l| &l.spans)
            .any(|s| !s.text.trim().is_empty())
    }
}

/// Read access to a paginated document.
///
/// Page numbers are 1-based throughout.
pub trait DocumentSource {
    /// Display title of the document, for record attribution.
    fn doc_title(&self) -> String;

    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Text blocks of a single page, in reading order.
    fn page_blocks(&self, page: usize) -> Result<Vec<RawBlock>>;

    /// Plain text of a single page, lines joined with `\n`.
    fn page_text(&self, page: usize) -> Result<String>;

    /// Embedded navigation tree flattened to pre-order, or empty when
    /// the document carries none.
    fn outline(&self) -> Vec<OutlineNode>;

    /// Drops any cached per-page state. Called once at the end of a run.
    fn clear_cache(&self) {}
}
