//! TOC entry construction.
//!
//! Two strategies produce the same record shape: [`OutlineTocExtractor`]
//! walks the document's embedded outline, [`PatternTocExtractor`] parses
//! dotted-leader lines out of the raw text of early pages. The strategy
//! seam is [`TocStrategy`].

use std::collections::HashSet;

use regex::Regex;

use crate::model::{OutlineNode, TocEntry};
use crate::source::DocumentSource;

/// Pages scanned by the pattern fallback.
const MAX_SCAN_PAGES: usize = 20;
/// Largest destination page the fallback accepts.
const MAX_DEST_PAGE: usize = 2000;
/// Shortest accepted entry title, in characters.
const MIN_TITLE_LEN: usize = 3;
/// Lines shorter than this are skipped by the fallback scan.
const MIN_LINE_LEN: usize = 5;

/// Builds TOC entries from an embedded outline.
#[derive(Default)]
pub struct OutlineTocExtractor;

impl OutlineTocExtractor {
    pub fn new() -> Self {
        Self
    }

    /// One entry per node, in source order.
    pub fn extract(&self, doc_title: &str, nodes: &[OutlineNode]) -> Vec<TocEntry> {
        let mut entries = Vec::with_capacity(nodes.len());
        let mut seen: HashSet<String> = HashSet::new();

        for node in nodes {
            let title = normalize(&node.title);
            let (section_id, from_token) = derive_section_id(&title);
            let clean = clean_title(&title, &section_id, from_token);
            let level = if section_id.contains('.') {
                dot_count(&section_id) as u32 + 1
            } else {
                node.level
            };

            entries.push(TocEntry {
                doc_title: doc_title.to_string(),
                full_path: full_path(&section_id, &clean),
                parent_id: parent_of(&section_id, &seen),
                title: clean,
                page: node.page,
                level,
                tags: Vec::new(),
                section_id: section_id.clone(),
            });
            seen.insert(section_id);
        }
        entries
    }
}

/// Parses TOC-like lines from the raw text of a document's first pages.
///
/// A line containing `contents` (case-insensitive) opens the scan for
/// every line form. Before that, lines carrying a dotted leader or a
/// double space are still parsed; only plain heading lines wait for
/// the gate.
pub struct PatternTocExtractor {
    dotted_leader: Regex,
    numbered_leader: Regex,
    plain_heading: Regex,
}

impl PatternTocExtractor {
    pub fn new() -> Self {
        Self {
            dotted_leader: Regex::new(r"^([A-Z][^.]*?)\s*\.{3,}\s*(\d+)$").unwrap(),
            numbered_leader: Regex::new(r"^(\d+(?:\.\d+)*)\s+([^.]+?)\s*\.{2,}\s*(\d+)$")
                .unwrap(),
            plain_heading: Regex::new(r"^([A-Z][A-Za-z\s&(),-]+)\s+(\d+)$").unwrap(),
        }
    }

    pub fn extract(&self, doc_title: &str, source: &dyn DocumentSource) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut counter = 1usize;
        let mut gate_open = false;

        let pages = source.page_count().min(MAX_SCAN_PAGES);
        for page in 1..=pages {
            let text = match source.page_text(page) {
                Ok(text) => text,
                Err(err) => {
                    log::warn!("TOC scan skipped page {}: {}", page, err);
                    continue;
                }
            };

            for line in text.lines() {
                let line = line.trim();
                if line.chars().count() < MIN_LINE_LEN {
                    continue;
                }
                if !gate_open {
                    if line.to_lowercase().contains("contents") {
                        gate_open = true;
                        continue;
                    }
                    // Leader markers are trusted even before a contents
                    // heading appears; anything else waits.
                    if !line.contains("...") && !line.contains("  ") {
                        continue;
                    }
                }
                if let Some((section_id, title, dest_page)) = self.parse_line(line, counter) {
                    if !(1..=MAX_DEST_PAGE).contains(&dest_page)
                        || title.chars().count() < MIN_TITLE_LEN
                    {
                        continue;
                    }
                    let level = if section_id.contains('.') {
                        dot_count(&section_id) as u32 + 1
                    } else {
                        1
                    };
                    entries.push(TocEntry {
                        doc_title: doc_title.to_string(),
                        full_path: full_path(&section_id, &title),
                        parent_id: parent_of(&section_id, &seen),
                        title,
                        page: dest_page,
                        level,
                        tags: Vec::new(),
                        section_id: section_id.clone(),
                    });
                    seen.insert(section_id);
                    counter += 1;
                }
            }
        }
        entries
    }

    /// Tries the line forms in order. Forms without a numbering group
    /// take `S{counter}` as their id; the counter itself advances in
    /// `extract`, once per accepted entry of any form.
    fn parse_line(&self, line: &str, counter: usize) -> Option<(String, String, usize)> {
        if let Some(caps) = self.dotted_leader.captures(line) {
            let page = caps[2].parse().ok()?;
            return Some((format!("S{}", counter), caps[1].trim().to_string(), page));
        }
        if let Some(caps) = self.numbered_leader.captures(line) {
            let page = caps[3].parse().ok()?;
            return Some((caps[1].to_string(), caps[2].trim().to_string(), page));
        }
        if let Some(caps) = self.plain_heading.captures(line) {
            let page = caps[2].parse().ok()?;
            return Some((format!("S{}", counter), caps[1].trim().to_string(), page));
        }
        None
    }
}

impl Default for PatternTocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Strategy selection over the two extractors.
///
/// The embedded outline is authoritative; the pattern scan runs only
/// when the outline yields zero entries.
#[derive(Default)]
pub struct TocStrategy {
    outline: OutlineTocExtractor,
    pattern: PatternTocExtractor,
}

impl TocStrategy {
    pub fn new() -> Self {
        Self {
            outline: OutlineTocExtractor::new(),
            pattern: PatternTocExtractor::new(),
        }
    }

    pub fn extract(&self, doc_title: &str, source: &dyn DocumentSource) -> Vec<TocEntry> {
        let entries = self.outline.extract(doc_title, &source.outline());
        if !entries.is_empty() {
            return entries;
        }
        log::info!("no embedded outline, scanning early pages for TOC lines");
        self.pattern.extract(doc_title, source)
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn dot_count(id: &str) -> usize {
    id.matches('.').count()
}

/// Derives a section id from a normalized title.
///
/// Returns the id and whether it came from the title's leading token
/// (as opposed to a slug of the whole title).
fn derive_section_id(title: &str) -> (String, bool) {
    if let Some(token) = title.split_whitespace().next() {
        let stripped = token.trim_end_matches('.');
        if !stripped.is_empty() {
            let parts: Vec<&str> = stripped.split('.').collect();
            let all_numeric = parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
            if all_numeric {
                return (stripped.to_string(), true);
            }
            let all_alnum = parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_alphanumeric()));
            if stripped.contains('.') && all_alnum {
                return (stripped.to_string(), true);
            }
        }
    }

    let slug: String = title
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(10)
        .collect::<String>()
        .to_lowercase();
    if slug.is_empty() {
        ("section".to_string(), false)
    } else {
        (slug, false)
    }
}

/// Title with a token-derived id removed and leading separators
/// stripped. Slug-derived ids leave the title untouched.
fn clean_title(title: &str, section_id: &str, from_token: bool) -> String {
    if !from_token {
        return title.to_string();
    }
    let removed = title.replacen(section_id, "", 1);
    let cleaned = removed.trim_start_matches(['.', ' ']).trim();
    if cleaned.is_empty() {
        title.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Dot-trimmed parent id, accepted only when an earlier entry produced
/// that id.
fn parent_of(section_id: &str, seen: &HashSet<String>) -> Option<String> {
    let idx = section_id.rfind('.')?;
    let candidate = &section_id[..idx];
    if seen.contains(candidate) {
        Some(candidate.to_string())
    } else {
        None
    }
}

fn full_path(section_id: &str, title: &str) -> String {
    if section_id.contains('.') {
        format!("{} {}", section_id, title)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::source::RawBlock;

    #[test]
    fn test_derive_numeric_dotted_id() {
        assert_eq!(derive_section_id("2.1 Scope"), ("2.1".to_string(), true));
        assert_eq!(derive_section_id("2. Scope"), ("2".to_string(), true));
        assert_eq!(derive_section_id("2.1.1 Rules"), ("2.1.1".to_string(), true));
    }

    #[test]
    fn test_derive_alphanumeric_dotted_id() {
        assert_eq!(derive_section_id("A.1 Annex"), ("A.1".to_string(), true));
    }

    #[test]
    fn test_derive_slug_id() {
        assert_eq!(
            derive_section_id("Revision History"),
            ("revisionhi".to_string(), false)
        );
        assert_eq!(derive_section_id("---"), ("section".to_string(), false));
    }

    #[test]
    fn test_clean_title_strips_id_and_separators() {
        assert_eq!(clean_title("2.1 Scope", "2.1", true), "Scope");
        assert_eq!(clean_title("2. Scope", "2", true), "Scope");
        assert_eq!(clean_title("Revision History", "revisionhi", false), "Revision History");
    }

    #[test]
    fn test_parent_chain_requires_earlier_entry() {
        let nodes = vec![
            OutlineNode::new(1, "2 Terms", 5),
            OutlineNode::new(2, "2.1 Scope", 6),
            OutlineNode::new(3, "2.1.1 Rules", 7),
            OutlineNode::new(2, "9.4 Orphan", 80),
        ];
        let entries = OutlineTocExtractor::new().extract("Doc", &nodes);
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].parent_id, None);
        assert_eq!(entries[1].parent_id, Some("2".to_string()));
        assert_eq!(entries[2].parent_id, Some("2.1".to_string()));
        // "9" never appeared, so the orphan has no parent.
        assert_eq!(entries[3].parent_id, None);
    }

    #[test]
    fn test_blank_title_node_still_yields_entry() {
        let nodes = vec![OutlineNode::new(1, "   ", 9)];
        let entries = OutlineTocExtractor::new().extract("Doc", &nodes);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section_id, "section");
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].page, 9);
        assert_eq!(entries[0].level, 1);
    }

    #[test]
    fn test_levels_and_full_paths() {
        let nodes = vec![
            OutlineNode::new(3, "Introduction", 1),
            OutlineNode::new(1, "2.1 Scope", 6),
        ];
        let entries = OutlineTocExtractor::new().extract("Doc", &nodes);
        // Undotted id keeps the node's own level and a bare path.
        assert_eq!(entries[0].level, 3);
        assert_eq!(entries[0].full_path, "Introduction");
        // Dotted id derives level from dot count.
        assert_eq!(entries[1].level, 2);
        assert_eq!(entries[1].full_path, "2.1 Scope");
    }

    struct TextPages(Vec<&'static str>);

    impl DocumentSource for TextPages {
        fn doc_title(&self) -> String {
            "Doc".to_string()
        }
        fn page_count(&self) -> usize {
            self.0.len()
        }
        fn page_blocks(&self, _page: usize) -> Result<Vec<RawBlock>> {
            Ok(vec![])
        }
        fn page_text(&self, page: usize) -> Result<String> {
            Ok(self.0[page - 1].to_string())
        }
        fn outline(&self) -> Vec<OutlineNode> {
            vec![]
        }
    }

    #[test]
    fn test_plain_headings_wait_for_contents_line() {
        let source = TextPages(vec![
            "Cover Page\nRevision History 3\nIntroduction ......... 4\n",
            "Table of Contents\n1.2 Power Rules ...... 14\nGlossary ............ 30\n",
        ]);
        let entries = PatternTocExtractor::new().extract("Doc", &source);
        assert_eq!(entries.len(), 3);
        // A dotted leader is trusted before the contents marker.
        assert_eq!(entries[0].section_id, "S1");
        assert_eq!(entries[0].title, "Introduction");
        assert_eq!(entries[0].page, 4);
        // A plain heading before the marker is not.
        assert!(entries.iter().all(|e| e.title != "Revision History"));
        assert_eq!(entries[1].section_id, "1.2");
        assert_eq!(entries[1].title, "Power Rules");
        assert_eq!(entries[1].level, 2);
        // The counter advanced for the numbered entry too.
        assert_eq!(entries[2].section_id, "S3");
        assert_eq!(entries[2].title, "Glossary");
    }

    #[test]
    fn test_counter_counts_accepted_entries_of_any_form() {
        let source = TextPages(vec![
            "Contents\n1.2 Power Rules ...... 14\nGlossary ............ 30\n",
        ]);
        let entries = PatternTocExtractor::new().extract("Doc", &source);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].section_id, "1.2");
        assert_eq!(entries[1].section_id, "S2");
    }

    #[test]
    fn test_double_space_line_parsed_before_gate() {
        let source = TextPages(vec!["Annex Overview  12\n"]);
        let entries = PatternTocExtractor::new().extract("Doc", &source);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section_id, "S1");
        assert_eq!(entries[0].title, "Annex Overview");
        assert_eq!(entries[0].page, 12);
    }

    #[test]
    fn test_pattern_scan_rejects_out_of_range() {
        let source = TextPages(vec![
            "Contents\nAppendix ........ 2001\nAb ........ 9\nGlossary ........ 12\n",
        ]);
        let entries = PatternTocExtractor::new().extract("Doc", &source);
        // Page above 2000 and a two-char title are both rejected, and
        // rejected lines leave the id counter untouched.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Glossary");
        assert_eq!(entries[0].section_id, "S1");
    }

    #[test]
    fn test_strategy_prefers_outline() {
        struct WithOutline;
        impl DocumentSource for WithOutline {
            fn doc_title(&self) -> String {
                "Doc".to_string()
            }
            fn page_count(&self) -> usize {
                1
            }
            fn page_blocks(&self, _page: usize) -> Result<Vec<RawBlock>> {
                Ok(vec![])
            }
            fn page_text(&self, _page: usize) -> Result<String> {
                Ok("Contents\nShadow Entry ......... 5\n".to_string())
            }
            fn outline(&self) -> Vec<OutlineNode> {
                vec![OutlineNode::new(1, "1.1 Real Entry", 3)]
            }
        }
        let entries = TocStrategy::new().extract("Doc", &WithOutline);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section_id, "1.1");
    }

    #[test]
    fn test_strategy_falls_back_when_outline_empty() {
        let source = TextPages(vec!["Contents\nOverview .......... 2\n"]);
        let entries = TocStrategy::new().extract("Doc", &source);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].section_id, "S1");
        assert_eq!(entries[0].title, "Overview");
    }
}
