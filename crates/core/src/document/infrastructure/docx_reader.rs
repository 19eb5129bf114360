use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::document::domain::document_reader::{DocumentError, DocumentReader};

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts raw text from a word-processor (OOXML) document.
///
/// Only the main document part is read. Run text is concatenated, each
/// paragraph is followed by a blank line, and tabs and line breaks are kept.
/// Formatting, headers, footers, and footnotes are ignored.
pub struct DocxReader;

impl DocumentReader for DocxReader {
    fn read_text(&self, path: &Path) -> Result<String, DocumentError> {
        let file = File::open(path).map_err(|e| DocumentError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let extraction = |message: String| DocumentError::Extraction {
            path: path.to_path_buf(),
            message,
        };

        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| extraction(format!("not a word-processor package: {e}")))?;
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| extraction(format!("missing {DOCUMENT_PART}: {e}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)
            .map_err(|e| extraction(format!("unreadable {DOCUMENT_PART}: {e}")))?;

        Ok(document_xml_to_text(&xml))
    }
}

fn markup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:tab\s*/>|<w:br(?:\s[^>]*)?/>")
            .expect("document markup pattern is a valid regex")
    })
}

fn entity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|amp|lt|gt|quot|apos);")
            .expect("entity pattern is a valid regex")
    })
}

pub(crate) fn document_xml_to_text(xml: &str) -> String {
    let mut text = String::new();
    for caps in markup().captures_iter(xml) {
        if let Some(run) = caps.get(1) {
            text.push_str(&unescape(run.as_str()));
            continue;
        }
        match &caps[0] {
            "</w:p>" => text.push_str("\n\n"),
            tag if tag.starts_with("<w:tab") => text.push('\t'),
            _ => text.push('\n'),
        }
    }
    text
}

fn unescape(raw: &str) -> String {
    entity()
        .replace_all(raw, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => name
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| name.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_docx(path: &Path, document_xml: &str) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file(DOCUMENT_PART, options).unwrap();
        zip.write_all(document_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:t>Good evening, </w:t></w:r><w:r><w:t xml:space="preserve">ladies &amp; gentlemen.</w:t></w:r></w:p>
<w:p><w:r><w:t>Tonight we begin.</w:t></w:r></w:p>
</w:body>
</w:document>"#;

    #[test]
    fn test_reads_paragraph_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("speech.docx");
        write_docx(&path, BODY);

        let text = DocxReader.read_text(&path).unwrap();
        assert_eq!(
            text,
            "Good evening, ladies & gentlemen.\n\nTonight we begin.\n\n"
        );
    }

    #[test]
    fn test_tabs_and_breaks() {
        let xml = "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>";
        assert_eq!(document_xml_to_text(xml), "a\tb\nc\n\n");
    }

    #[test]
    fn test_numeric_entities_decoded() {
        let xml = "<w:t>caf&#233; &#x2014; &lt;ok&gt; &bogus;</w:t>";
        assert_eq!(document_xml_to_text(xml), "café \u{2014} <ok> &bogus;");
    }

    #[test]
    fn test_not_a_zip_is_extraction_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("legacy.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0 legacy binary").unwrap();

        let result = DocxReader.read_text(&path);
        assert!(matches!(result, Err(DocumentError::Extraction { .. })));
    }

    #[test]
    fn test_zip_without_document_part_is_extraction_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("empty.docx");
        let file = File::create(&path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        zip.start_file("other.xml", options).unwrap();
        zip.write_all(b"<x/>").unwrap();
        zip.finish().unwrap();

        let result = DocxReader.read_text(&path);
        assert!(matches!(result, Err(DocumentError::Extraction { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = DocxReader.read_text(&tmp.path().join("nope.docx"));
        assert!(matches!(result, Err(DocumentError::Io { .. })));
    }
}
