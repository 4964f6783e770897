mod event_flow_tests;
mod state_tests;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use wordnote_config::Config;
use wordnote_core::{DateKey, VocabEntry};
use wordnote_lang_korean::FallbackTranslator;
use wordnote_store::{BackendError, SqliteBackend, VocabBackend, VocabCalendar, VocabularyStore};
use wordnote_translator::TranslationService;

use crate::state::AppState;

/// Backend that is never reachable
pub struct OfflineBackend;

#[async_trait]
impl VocabBackend for OfflineBackend {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn get(&self, _id: &str) -> Result<Option<VocabEntry>, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }

    async fn list_by_date(&self, _date_key: DateKey) -> Result<Vec<VocabEntry>, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<VocabEntry>, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }

    async fn put(&self, _entry: &VocabEntry) -> Result<(), BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<bool, BackendError> {
        Err(BackendError::Unavailable("offline".to_string()))
    }
}

fn offline_translator() -> TranslationService {
    let fallback = Arc::new(FallbackTranslator::new(Duration::ZERO));
    TranslationService::new(fallback, "en".to_string(), "ko".to_string())
}

pub fn state_with(backend: Arc<dyn VocabBackend>, profile_root: &Path) -> AppState {
    let store = VocabularyStore::new(backend);
    AppState::with_parts(
        Config::default(),
        "main",
        profile_root.to_path_buf(),
        offline_translator(),
        VocabCalendar::new(Arc::new(store)),
    )
}

pub fn memory_state(profile_root: &Path) -> AppState {
    let backend = SqliteBackend::open_in_memory().expect("in-memory sqlite");
    state_with(Arc::new(backend), profile_root)
}
