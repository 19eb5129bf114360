use std::path::Path;

use crate::document::domain::document_reader::{extension_of, DocumentError, DocumentReader};
use crate::shared::constants::{PDF_EXTENSIONS, TEXT_EXTENSIONS, WORD_EXTENSIONS};

use super::docx_reader::DocxReader;
use super::pdf_reader::PdfReader;
use super::text_file_reader::TextFileReader;

/// Picks a reader by the file's extension, case-insensitively.
///
/// Legacy `.doc` files are routed to the word-processor reader along with
/// `.docx`; a binary `.doc` then fails at extraction time rather than here.
pub fn create_reader(path: &Path) -> Result<Box<dyn DocumentReader>, DocumentError> {
    let ext = extension_of(path);
    if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(TextFileReader))
    } else if PDF_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(PdfReader))
    } else if WORD_EXTENSIONS.contains(&ext.as_str()) {
        Ok(Box::new(DocxReader))
    } else {
        Err(DocumentError::UnsupportedFormat(ext))
    }
}

/// Reads any supported document to plain text.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let reader = create_reader(path)?;
    let text = reader.read_text(path)?;
    log::info!("Loaded {} ({} chars)", path.display(), text.chars().count());
    Ok(text)
}
