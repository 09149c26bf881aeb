//! Error types for the doccorpus library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doccorpus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during corpus extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// The input file does not exist or is not a supported document type.
    #[error("Document not found or unsupported: {0}")]
    NotFound(PathBuf),

    /// The underlying engine could not open or parse the document.
    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    /// Block iteration failed for a single page. Recovered locally:
    /// the page yields zero records and the run continues.
    #[error("Extraction failed on page {page}: {message}")]
    Extraction { page: usize, message: String },

    /// Serialized output could not be re-parsed for reporting.
    #[error("Output validation failed: {0}")]
    Validation(String),

    /// I/O failure while persisting output. Fatal, aborts the run.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::CorruptDocument(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(err.to_string())
    }
}
