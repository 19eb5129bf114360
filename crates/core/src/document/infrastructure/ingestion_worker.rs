use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::document::domain::document_reader::DocumentError;

use super::document_reader_factory::extract_text;

/// A document whose text has been extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// File name shown in status messages.
    pub name: String,
    pub text: String,
}

/// Extracts a document on a background thread.
///
/// Multi-page extraction can take a while; running it off the caller's
/// thread lets both documents load concurrently before any table is built.
/// The receiver yields exactly one result.
pub fn spawn(path: PathBuf) -> Receiver<Result<LoadedDocument, DocumentError>> {
    let (tx, rx) = crossbeam_channel::bounded(1);

    thread::spawn(move || {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = extract_text(&path).map(|text| LoadedDocument { name, text });
        deliver(&tx, &path, result);
    });

    rx
}

/// Sends the result back; returns `false` if the receiver was dropped.
fn deliver(
    tx: &Sender<Result<LoadedDocument, DocumentError>>,
    path: &Path,
    result: Result<LoadedDocument, DocumentError>,
) -> bool {
    if tx.send(result).is_err() {
        log::debug!(
            "Dropped extraction result for {}; nobody is waiting for it",
            path.display()
        );
        return false;
    }
    true
}

/// Waits for a spawned extraction to finish.
pub fn wait(rx: &Receiver<Result<LoadedDocument, DocumentError>>) -> Result<LoadedDocument, DocumentError> {
    rx.recv().unwrap_or_else(|_| {
        Err(DocumentError::Extraction {
            path: PathBuf::new(),
            message: "ingestion worker exited without a result".to_string(),
        })
    })
}
