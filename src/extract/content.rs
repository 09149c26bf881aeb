//! Content record construction.

use crate::classify::Classifier;
use crate::model::ContentRecord;
use crate::source::RawBlock;

/// Default maximum title length before truncation.
pub const DEFAULT_TITLE_MAX_LEN: usize = 50;

/// Minimum normalized text length; text must exceed this to qualify.
pub const DEFAULT_MIN_TEXT_LEN: usize = 5;

/// Builds classified [`ContentRecord`]s from raw page blocks.
///
/// Given identical input blocks, output records are identical across
/// runs.
pub struct ContentExtractor {
    classifier: Classifier,
    title_max_len: usize,
    min_text_len: usize,
}

impl ContentExtractor {
    pub fn new() -> Self {
        Self {
            classifier: Classifier::new(),
            title_max_len: DEFAULT_TITLE_MAX_LEN,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
        }
    }

    /// Sets the title length above which titles are truncated.
    pub fn with_title_max_len(mut self, len: usize) -> Self {
        self.title_max_len = len;
        self
    }

    /// Sets the length the normalized text must exceed to qualify.
    pub fn with_min_text_len(mut self, len: usize) -> Self {
        self.min_text_len = len;
        self
    }

    /// Builds records for one page's blocks.
    ///
    /// Blocks without text, and blocks whose normalized text does not
    /// exceed the minimum length, are dropped without error.
    pub fn extract_page(
        &self,
        doc_title: &str,
        page: usize,
        blocks: &[RawBlock],
    ) -> Vec<ContentRecord> {
        let mut records = Vec::new();
        for block in blocks {
            if !block.has_text() {
                continue;
            }
            let raw = block.assemble();
            // The collapsed form drives the validity gate and title;
            // stored content keeps its interior spacing.
            let text = normalize(&raw);
            if text.chars().count() <= self.min_text_len {
                continue;
            }

            // Classify the raw text: normalization collapses the tab
            // runs the table rule keys on.
            let category = self.classifier.classify(&raw);
            let section_id = format!("{}{}_{}", category.prefix(), page, block.index);
            let title = truncate_title(&text, self.title_max_len);

            records.push(ContentRecord {
                doc_title: doc_title.to_string(),
                section_id: section_id.clone(),
                full_path: title.clone(),
                title,
                content: raw.trim().to_string(),
                page,
                level: 1,
                parent_id: None,
                category,
                block_id: section_id,
                bbox: block.bbox.clone(),
            });
        }
        records
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Newlines to spaces, runs of whitespace collapsed, ends trimmed.
fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_title(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let mut title: String = text.chars().take(max_len).collect();
        title.push_str("...");
        title
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::source::RawLine;

    fn block(index: usize, text: &str) -> RawBlock {
        RawBlock::new(index, vec![RawLine::from_text(text)])
    }

    #[test]
    fn test_empty_block_yields_nothing() {
        let extractor = ContentExtractor::new();
        let blocks = vec![RawBlock::new(0, vec![]), block(1, "   ")];
        assert!(extractor.extract_page("Doc", 1, &blocks).is_empty());
    }

    #[test]
    fn test_short_text_dropped_at_boundary() {
        let extractor = ContentExtractor::new();
        // Exactly 5 chars after normalization does not qualify.
        assert!(extractor.extract_page("Doc", 1, &[block(0, "ab cd")]).is_empty());
        assert_eq!(
            extractor.extract_page("Doc", 1, &[block(0, "ab cde")]).len(),
            1
        );
    }

    #[test]
    fn test_section_id_shape() {
        let extractor = ContentExtractor::new();
        let records =
            extractor.extract_page("Doc", 3, &[block(7, "The device shall respond.")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, Category::Requirement);
        assert_eq!(records[0].section_id, "r3_7");
        assert_eq!(records[0].block_id, "r3_7");
        assert_eq!(records[0].page, 3);
        assert_eq!(records[0].level, 1);
        assert!(records[0].parent_id.is_none());
    }

    #[test]
    fn test_title_truncated_with_ellipsis() {
        let extractor = ContentExtractor::new();
        let long = "word ".repeat(30);
        let records = extractor.extract_page("Doc", 1, &[block(0, &long)]);
        assert_eq!(records[0].title.chars().count(), 53);
        assert!(records[0].title.ends_with("..."));
        assert_eq!(records[0].full_path, records[0].title);
    }

    #[test]
    fn test_title_collapsed_content_spacing_kept() {
        let extractor = ContentExtractor::new();
        let blocks = vec![RawBlock::new(
            0,
            vec![
                RawLine::from_text("Overview of the \n"),
                RawLine::from_text("  protocol   layer"),
            ],
        )];
        let records = extractor.extract_page("Doc", 1, &blocks);
        assert_eq!(records[0].title, "Overview of the protocol layer");
        // Content is trimmed at the ends only.
        assert_eq!(records[0].content, "Overview of the \n  protocol   layer");
    }

    #[test]
    fn test_table_rows_classified_before_normalization() {
        let extractor = ContentExtractor::new();
        let records = extractor.extract_page("Doc", 1, &[block(0, "volts\t\tamps\t\twatts")]);
        assert_eq!(records[0].category, Category::TableData);
        assert_eq!(records[0].content, "volts\t\tamps\t\twatts");
    }

    #[test]
    fn test_identical_input_identical_output() {
        let extractor = ContentExtractor::new();
        let blocks = vec![block(0, "2.1 Power negotiation rules")];
        let a = extractor.extract_page("Doc", 2, &blocks);
        let b = extractor.extract_page("Doc", 2, &blocks);
        assert_eq!(a, b);
    }
}
