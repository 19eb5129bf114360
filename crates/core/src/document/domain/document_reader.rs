use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported file type: .{0}")]
    UnsupportedFormat(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to extract text from {path}: {message}")]
    Extraction { path: PathBuf, message: String },
}

/// Domain interface for turning an uploaded document into plain text.
///
/// The alignment core only ever sees the returned string; it is agnostic
/// to the file format it came from.
pub trait DocumentReader: Send {
    fn read_text(&self, path: &Path) -> Result<String, DocumentError>;
}

/// Lower-cased file extension, or an empty string when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}
