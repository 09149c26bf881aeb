//! Record extraction from document sources.
//!
//! [`ContentExtractor`] builds classified content records from page
//! blocks. TOC extraction has two interchangeable strategies behind
//! [`TocStrategy`]: the embedded outline when the document carries one,
//! and dotted-leader pattern parsing of early pages as a fallback.

mod content;
mod toc;

pub use content::{ContentExtractor, DEFAULT_MIN_TEXT_LEN, DEFAULT_TITLE_MAX_LEN};
pub use toc::{OutlineTocExtractor, PatternTocExtractor, TocStrategy};
