use std::time::SystemTime;

use wordnote_core::normalize::TRANSLATION_ERROR_TEXT;
use wordnote_core::preprocess::{Preprocessor, SelectionPreprocessor};
use wordnote_core::{DateKey, VocabEntry};
use wordnote_store::AddOutcome;

use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    /// Invalid or duplicate, nothing written
    Skipped,
    Failed(String),
    /// Translation failed, nothing to save
    NotAttempted,
}

/// What the user gets to see for one selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub source: String,
    pub text: String,
    pub provider: String,
    pub save: SaveStatus,
}

/// Selection -> translation -> vocabulary entry for `date_key`
///
/// Returns `None` when the selection is empty or too long. Save failures never hide the
/// translation.
pub async fn capture(state: &AppState, raw: &str, date_key: DateKey) -> Option<Captured> {
    let Some(source) = SelectionPreprocessor.accept(raw) else {
        tracing::debug!("Ignoring selection of {} chars", raw.chars().count());
        state.status.capture.write().await.ignored_count += 1;
        return None;
    };

    {
        let mut status = state.status.capture.write().await;
        status.capture_count += 1;
        status.last_capture_time = Some(SystemTime::now());
    }

    let translation = match state.translator.translate(&source).await {
        Ok(translation) => translation,
        Err(e) => {
            tracing::error!("Translation failed for '{}': {}", source, e);
            let mut status = state.status.capture.write().await;
            status.error_count += 1;
            status.current_message = e.to_string();
            return Some(Captured {
                source,
                text: TRANSLATION_ERROR_TEXT.to_string(),
                provider: "none".to_string(),
                save: SaveStatus::NotAttempted,
            });
        }
    };

    let entry = VocabEntry::new(date_key, source.as_str(), translation.text.as_str());
    let save = match state.calendar.store().add(entry).await {
        Ok(AddOutcome::Saved { .. }) => SaveStatus::Saved,
        Ok(outcome) => {
            tracing::debug!("Not saved: {:?}", outcome);
            SaveStatus::Skipped
        }
        Err(e) => {
            tracing::warn!("Saving '{}' failed: {}", source, e);
            SaveStatus::Failed(e.to_string())
        }
    };

    {
        let mut status = state.status.capture.write().await;
        match &save {
            SaveStatus::Saved => status.saved_count += 1,
            SaveStatus::Skipped => status.skipped_count += 1,
            SaveStatus::Failed(reason) => {
                status.error_count += 1;
                status.current_message = reason.clone();
            }
            SaveStatus::NotAttempted => {}
        }
    }

    Some(Captured {
        source,
        text: translation.text,
        provider: translation.provider,
        save,
    })
}
