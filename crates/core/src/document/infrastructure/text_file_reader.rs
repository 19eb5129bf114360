use std::fs;
use std::path::Path;

use crate::document::domain::document_reader::{DocumentError, DocumentReader};

/// Reads a plain-text file as-is.
///
/// Invalid UTF-8 sequences are replaced rather than rejected, so a stray
/// byte in a hand-edited script does not block the whole upload.
pub struct TextFileReader;

impl DocumentReader for TextFileReader {
    fn read_text(&self, path: &Path) -> Result<String, DocumentError> {
        let bytes = fs::read(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
