use serde::{Deserialize, Serialize};
use wordnote_core::{DateKey, VocabEntry};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw selection from a watcher
    TextInput(String),
    ShowTranslation {
        source: String,
        text: String,
        from_lang: String,
        to_lang: String,
        provider: String,
    },
    SaveFailed {
        source: String,
        reason: String,
    },
    /// A store mutation touched this day
    VocabUpdated(DateKey),
    RequestDay(DateKey),
    RequestMonth {
        year: i32,
        month: u32,
    },
    ShowDay {
        date_key: DateKey,
        entries: Vec<DisplayEntry>,
    },
    ShowMonth {
        label: String,
        days: Vec<MonthCell>,
    },
    UpdateEntry {
        id: String,
        date_key: DateKey,
        source_text: Option<String>,
        translated_text: Option<String>,
    },
    RemoveEntry {
        id: String,
        date_key: DateKey,
    },
    ToggleHideMode,
    HideModeChanged(String),
    StatusUpdate(String),
    BackendReady,
    UiEvent(UiEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntry {
    pub id: String,
    pub source_text: String,
    pub translated_text: String,
}

impl From<&VocabEntry> for DisplayEntry {
    fn from(entry: &VocabEntry) -> Self {
        Self {
            id: entry.id.clone(),
            source_text: entry.source_text.clone(),
            translated_text: entry.translated_text.clone(),
        }
    }
}

/// One calendar cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCell {
    pub date_key: DateKey,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Help,
    Close,
}
