use serde::{Deserialize, Serialize};

use crate::date::DateKey;
use crate::id::compute_id;
use crate::normalize::normalize;

/// One saved (source, translation) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub id: String,
    pub date_key: DateKey,
    pub source_text: String,
    pub translated_text: String,
}

impl VocabEntry {
    pub fn new(
        date_key: DateKey,
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
    ) -> Self {
        let source_text = source_text.into();
        let translated_text = translated_text.into();

        Self {
            id: compute_id(date_key, &source_text, &translated_text),
            date_key,
            source_text,
            translated_text,
        }
    }

    /// Normalized (source, translated) pair used for store-wide dedup
    pub fn pair_key(&self) -> (String, String) {
        (normalize(&self.source_text), normalize(&self.translated_text))
    }
}

/// Fields the management view may change on an existing entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub source_text: Option<String>,
    pub translated_text: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.source_text.is_none() && self.translated_text.is_none()
    }

    /// The entry with the provided fields merged in and its id derived again
    pub fn merged(&self, entry: &VocabEntry) -> VocabEntry {
        let source = self.source_text.as_ref().unwrap_or(&entry.source_text);
        let translated = self.translated_text.as_ref().unwrap_or(&entry.translated_text);
        VocabEntry::new(entry.date_key, source.as_str(), translated.as_str())
    }
}
