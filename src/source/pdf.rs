//! Lopdf-backed document source.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::Document;

use crate::error::{Error, Result};
use crate::model::OutlineNode;
use crate::source::{DocumentSource, RawBlock, RawLine};

/// [`DocumentSource`] backed by `lopdf::Document`.
///
/// Page blocks are cached on first access and released by
/// [`DocumentSource::clear_cache`] at the end of a run.
#[derive(Debug)]
pub struct PdfSource {
    doc: Document,
    title: String,
    page_ids: BTreeMap<u32, lopdf::ObjectId>,
    cache: RefCell<HashMap<usize, Vec<RawBlock>>>,
}

impl PdfSource {
    /// Opens a PDF file.
    ///
    /// Fails with [`Error::NotFound`] when the path does not exist or
    /// does not carry a `.pdf` extension, and [`Error::CorruptDocument`]
    /// when the engine rejects the file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() || !has_pdf_extension(&path) {
            return Err(Error::NotFound(path));
        }

        let doc = Document::load(&path)?;
        let page_ids = doc.get_pages();
        let title = document_title(&doc).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Untitled".to_string())
        });

        Ok(Self {
            doc,
            title,
            page_ids,
            cache: RefCell::new(HashMap::new()),
        })
    }

    fn extract_page_text(&self, page: usize) -> Result<String> {
        if page == 0 || page > self.page_ids.len() {
            return Err(Error::Extraction {
                page,
                message: "page out of range".to_string(),
            });
        }
        self.doc
            .extract_text(&[page as u32])
            .map_err(|e| Error::Extraction {
                page,
                message: e.to_string(),
            })
    }

    /// Groups consecutive non-empty lines of a page's text into blocks.
    fn blocks_from_text(text: &str) -> Vec<RawBlock> {
        let mut blocks = Vec::new();
        let mut current: Vec<RawLine> = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(RawBlock::new(blocks.len(), std::mem::take(&mut current)));
                }
            } else {
                current.push(RawLine::from_text(line));
            }
        }
        if !current.is_empty() {
            blocks.push(RawBlock::new(blocks.len(), current));
        }
        blocks
    }

    /// Recursively flattens outline items to pre-order.
    fn collect_outline_items(
        &self,
        item_ref: lopdf::ObjectId,
        level: u32,
        items: &mut Vec<OutlineNode>,
    ) {
        if let Ok(item_dict) = self.doc.get_dictionary(item_ref) {
            let title = get_string_from_dict(item_dict, b"Title").unwrap_or_default();
            let page = self
                .outline_destination(item_dict)
                .map(|p| p as usize)
                .unwrap_or(1);

            items.push(OutlineNode::new(level, title, page));

            if let Ok(first) = item_dict.get(b"First") {
                if let Ok(first_ref) = first.as_reference() {
                    self.collect_outline_items(first_ref, level + 1, items);
                }
            }
            if let Ok(next) = item_dict.get(b"Next") {
                if let Ok(next_ref) = next.as_reference() {
                    self.collect_outline_items(next_ref, level, items);
                }
            }
        }
    }

    /// Destination page from an outline item, via Dest or an action
    /// dictionary.
    fn outline_destination(&self, item_dict: &lopdf::Dictionary) -> Option<u32> {
        if let Ok(dest) = item_dict.get(b"Dest") {
            return self.resolve_destination(dest);
        }
        if let Ok(action) = item_dict.get(b"A") {
            if let Ok(action_ref) = action.as_reference() {
                if let Ok(action_dict) = self.doc.get_dictionary(action_ref) {
                    if let Ok(dest) = action_dict.get(b"D") {
                        return self.resolve_destination(dest);
                    }
                }
            }
        }
        None
    }

    fn resolve_destination(&self, dest: &lopdf::Object) -> Option<u32> {
        if let Ok(dest_array) = dest.as_array() {
            if let Some(first) = dest_array.first() {
                if let Ok(page_ref) = first.as_reference() {
                    for (num, id) in self.page_ids.iter() {
                        if *id == page_ref {
                            return Some(*num);
                        }
                    }
                }
            }
        }
        None
    }
}

impl DocumentSource for PdfSource {
    fn doc_title(&self) -> String {
        self.title.clone()
    }

    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_blocks(&self, page: usize) -> Result<Vec<RawBlock>> {
        if let Some(cached) = self.cache.borrow().get(&page) {
            return Ok(cached.clone());
        }
        let text = self.extract_page_text(page)?;
        let blocks = Self::blocks_from_text(&text);
        self.cache.borrow_mut().insert(page, blocks.clone());
        Ok(blocks)
    }

    fn page_text(&self, page: usize) -> Result<String> {
        self.extract_page_text(page)
    }

    fn outline(&self) -> Vec<OutlineNode> {
        let mut items = Vec::new();
        if let Ok(catalog) = self.doc.catalog() {
            if let Ok(outlines) = catalog.get(b"Outlines") {
                if let Ok(outlines_ref) = outlines.as_reference() {
                    if let Ok(outlines_dict) = self.doc.get_dictionary(outlines_ref) {
                        if let Ok(first) = outlines_dict.get(b"First") {
                            if let Ok(first_ref) = first.as_reference() {
                                self.collect_outline_items(first_ref, 1, &mut items);
                            }
                        }
                    }
                }
            }
        }
        items
    }

    fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn document_title(doc: &Document) -> Option<String> {
    let info = doc.trailer.get(b"Info").ok()?;
    let info_ref = info.as_reference().ok()?;
    let info_dict = doc.get_dictionary(info_ref).ok()?;
    get_string_from_dict(info_dict, b"Title").filter(|t| !t.trim().is_empty())
}

/// String value from a PDF dictionary, handling UTF-16BE markers.
fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        lopdf::Object::String(bytes, _) => {
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks(2)
                    .filter_map(|c| {
                        if c.len() == 2 {
                            Some(u16::from_be_bytes([c[0], c[1]]))
                        } else {
                            None
                        }
                    })
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        lopdf::Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}
