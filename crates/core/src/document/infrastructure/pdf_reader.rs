use std::path::Path;

use crate::document::domain::document_reader::{DocumentError, DocumentReader};

/// Extracts the text layer of a PDF, all pages in order.
///
/// Scanned PDFs without a text layer yield an empty string.
pub struct PdfReader;

impl DocumentReader for PdfReader {
    fn read_text(&self, path: &Path) -> Result<String, DocumentError> {
        if !path.exists() {
            return Err(DocumentError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }

        let text = pdf_extract::extract_text(path).map_err(|e| DocumentError::Extraction {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!(
            "Extracted {} characters from {}",
            text.chars().count(),
            path.display()
        );
        Ok(text.trim().to_string())
    }
}
