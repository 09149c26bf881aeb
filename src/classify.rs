//! Rule-based block classification.
//!
//! Blocks are matched against a fixed, ordered rule table; the first
//! matching rule wins and unmatched text falls through to
//! [`Category::Paragraph`]. The rule order is part of the output
//! contract and must not be reordered.

use regex::Regex;

use crate::model::Category;

/// Ordered rule table mapping text patterns to categories.
pub struct Classifier {
    rules: Vec<(Category, Regex)>,
}

impl Classifier {
    pub fn new() -> Self {
        // Unanchored search semantics unless a rule anchors itself.
        let rules = vec![
            (
                Category::MajorSection,
                Regex::new(r"(?i)\b(Overview|References|Terms|Definitions)\b").unwrap(),
            ),
            (Category::SectionHeader, Regex::new(r"^\d+\.\d+").unwrap()),
            (
                Category::Requirement,
                Regex::new(r"(?i)\b(shall|must|required)\b").unwrap(),
            ),
            (Category::Definition, Regex::new(r":").unwrap()),
            (Category::NumberedItem, Regex::new(r"^\d+\.").unwrap()),
            (Category::BulletPoint, Regex::new(r"^[•\-]").unwrap()),
            (Category::TableData, Regex::new(r"[|\t]{2,}").unwrap()),
        ];
        Self { rules }
    }

    /// Classifies a block of text. The input is trimmed before
    /// matching so leading markers anchor correctly.
    pub fn classify(&self, text: &str) -> Category {
        let trimmed = text.trim();
        for (category, pattern) in &self.rules {
            if pattern.is_match(trimmed) {
                return *category;
            }
        }
        Category::Paragraph
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_section_wins_over_later_rules() {
        let c = Classifier::new();
        // Contains both a keyword and a colon; the earlier rule wins.
        assert_eq!(c.classify("1.2 Overview: scope"), Category::MajorSection);
        assert_eq!(c.classify("Normative References"), Category::MajorSection);
    }

    #[test]
    fn test_section_header_requires_dotted_number() {
        let c = Classifier::new();
        assert_eq!(c.classify("2.1 Power rules"), Category::SectionHeader);
        // A bare "N." is a numbered item, not a header.
        assert_eq!(c.classify("3. First step"), Category::NumberedItem);
    }

    #[test]
    fn test_requirement_keywords_case_insensitive() {
        let c = Classifier::new();
        assert_eq!(
            c.classify("The device SHALL respond within tReceive"),
            Category::Requirement
        );
        assert_eq!(
            c.classify("A source must advertise capabilities"),
            Category::Requirement
        );
    }

    #[test]
    fn test_definition_on_colon() {
        let c = Classifier::new();
        assert_eq!(c.classify("VBUS: the main power rail"), Category::Definition);
    }

    #[test]
    fn test_bullet_and_table() {
        let c = Classifier::new();
        assert_eq!(c.classify("• first point"), Category::BulletPoint);
        assert_eq!(c.classify("- dash bullet"), Category::BulletPoint);
        assert_eq!(c.classify("cell\t\tcell"), Category::TableData);
    }

    #[test]
    fn test_fallback_is_paragraph() {
        let c = Classifier::new();
        assert_eq!(
            c.classify("Ordinary body text with no markers"),
            Category::Paragraph
        );
    }

    #[test]
    fn test_input_trimmed_before_anchors() {
        let c = Classifier::new();
        assert_eq!(c.classify("   2.3 Indented header"), Category::SectionHeader);
    }
}
