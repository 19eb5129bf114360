use super::segment::{Segment, Segmenter};

/// One positionally paired source/translation sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentEntry {
    pub index: usize,
    pub source: Segment,
    pub translated: Segment,
}

/// The fixed corpus the engine tracks against.
///
/// Source and translated segments are zipped by position. Translations are
/// assumed to keep sentence order and count, so no content-based alignment
/// is attempted. When the two sides segment to different lengths, the table
/// is truncated to the shorter one and the trailing segments of the longer
/// side are dropped; this truncation is the pairing policy, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlignmentTable {
    entries: Vec<AlignmentEntry>,
}

impl AlignmentTable {
    pub fn build(original_text: &str, translated_text: &str) -> Self {
        Self::build_with(&Segmenter::default(), original_text, translated_text)
    }

    pub fn build_with(segmenter: &Segmenter, original_text: &str, translated_text: &str) -> Self {
        let source = segmenter.segment(original_text);
        let translated = segmenter.segment(translated_text);

        if source.len() != translated.len() {
            log::warn!(
                "Segment count mismatch: {} source vs {} translated; keeping the first {}",
                source.len(),
                translated.len(),
                source.len().min(translated.len())
            );
        }

        let entries = source
            .into_iter()
            .zip(translated)
            .enumerate()
            .map(|(index, (source, translated))| AlignmentEntry {
                index,
                source,
                translated,
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AlignmentEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[AlignmentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlignmentEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a AlignmentTable {
    type Item = &'a AlignmentEntry;
    type IntoIter = std::slice::Iter<'a, AlignmentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
