//! Line-delimited JSON persistence.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Writes record streams as JSONL, one compact object per line.
#[derive(Debug, Default)]
pub struct JsonlWriter;

impl JsonlWriter {
    pub fn new() -> Self {
        Self
    }

    /// Overwrites `dest` with the records. Parent directories are
    /// created as needed.
    pub fn write<T: Serialize, P: AsRef<Path>>(&self, records: &[T], dest: P) -> Result<()> {
        let file = self.create(dest.as_ref(), false)?;
        self.write_lines(records, file)
    }

    /// Appends the records to `dest`, creating it if absent.
    pub fn append<T: Serialize, P: AsRef<Path>>(&self, records: &[T], dest: P) -> Result<()> {
        let file = self.create(dest.as_ref(), true)?;
        self.write_lines(records, file)
    }

    fn create(&self, dest: &Path, append: bool) -> Result<File> {
        if let Some(parent) = dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(dest)?;
        Ok(file)
    }

    fn write_lines<T: Serialize>(&self, records: &[T], file: File) -> Result<()> {
        let mut out = BufWriter::new(file);
        for record in records {
            let line = serde_json::to_string(record)?;
            out.write_all(line.as_bytes())?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Re-parses a JSONL stream, one record per non-empty line.
///
/// A non-parsable line surfaces [`Error::Validation`].
pub fn read_jsonl<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();
    for (num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line)
            .map_err(|e| Error::Validation(format!("line {}: {}", num + 1, e)))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TocEntry;

    fn entry(id: &str) -> TocEntry {
        TocEntry {
            doc_title: "Doc".to_string(),
            section_id: id.to_string(),
            title: "Title".to_string(),
            full_path: "Title".to_string(),
            page: 1,
            level: 1,
            parent_id: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("toc.jsonl");
        let records = vec![entry("1"), entry("2"), entry("3")];

        JsonlWriter::new().write(&records, &path).unwrap();
        let back: Vec<TocEntry> = read_jsonl(&path).unwrap();
        assert_eq!(back, records);

        // One line per record, no pretty-printing.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw.lines().count(), 3);
        assert!(!raw.contains("  "));
    }

    #[test]
    fn test_write_overwrites_append_extends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toc.jsonl");
        let writer = JsonlWriter::new();

        writer.write(&[entry("1"), entry("2")], &path).unwrap();
        writer.write(&[entry("3")], &path).unwrap();
        let back: Vec<TocEntry> = read_jsonl(&path).unwrap();
        assert_eq!(back.len(), 1);

        writer.append(&[entry("4")], &path).unwrap();
        let back: Vec<TocEntry> = read_jsonl(&path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[1].section_id, "4");
    }

    #[test]
    fn test_bad_line_is_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();

        let err = read_jsonl::<TocEntry, _>(&path).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
