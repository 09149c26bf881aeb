//! Content-stream record types.

use serde::{Deserialize, Serialize};

/// Semantic category assigned to a content block.
///
/// The set of variants is fixed; records never carry free-form categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MajorSection,
    SectionHeader,
    Requirement,
    Definition,
    NumberedItem,
    BulletPoint,
    TableData,
    Paragraph,
}

impl Category {
    /// Snake-case name as it appears in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MajorSection => "major_section",
            Category::SectionHeader => "section_header",
            Category::Requirement => "requirement",
            Category::Definition => "definition",
            Category::NumberedItem => "numbered_item",
            Category::BulletPoint => "bullet_point",
            Category::TableData => "table_data",
            Category::Paragraph => "paragraph",
        }
    }

    /// Single-character prefix used in derived section ids.
    pub fn prefix(&self) -> char {
        match self {
            Category::MajorSection => 'm',
            Category::SectionHeader => 's',
            Category::Requirement => 'r',
            Category::Definition => 'd',
            Category::NumberedItem => 'n',
            Category::BulletPoint => 'b',
            Category::TableData => 't',
            Category::Paragraph => 'p',
        }
    }

    /// All categories in classification order.
    pub fn all() -> [Category; 8] {
        [
            Category::MajorSection,
            Category::SectionHeader,
            Category::Requirement,
            Category::Definition,
            Category::NumberedItem,
            Category::BulletPoint,
            Category::TableData,
            Category::Paragraph,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified content block, as persisted to the content stream.
///
/// `section_id` has the form `{category_prefix}{page}_{block_index}` and is
/// unique per (page, block index) pair within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub doc_title: String,
    pub section_id: String,
    /// Trimmed text, truncated to the configured title length.
    pub title: String,
    /// Block text trimmed at the ends; interior spacing preserved.
    pub content: String,
    /// 1-based page number.
    pub page: usize,
    pub level: u32,
    pub parent_id: Option<String>,
    pub full_path: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub block_id: String,
    /// Bounding box (4 numbers) or empty. Opaque pass-through data.
    pub bbox: Vec<f64>,
}

impl ContentRecord {
    /// Number of whitespace-separated words in the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Content length in characters.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}
