use std::sync::Arc;

use wordnote_config::storage::{BackendKind, StorageConfig};

pub mod backend;
pub mod blob;
pub mod calendar;
pub mod export;
pub mod sqlite;
pub mod store;

pub use backend::{BackendError, VocabBackend};
pub use blob::JsonBlobBackend;
pub use calendar::{DayView, MonthView, VocabCalendar};
pub use export::ExportFormat;
pub use sqlite::SqliteBackend;
pub use store::{AddOutcome, ChangeKind, StoreError, StoreEvent, UpdateOutcome, VocabularyStore};

fn open_backend(
    kind: BackendKind,
    config: &StorageConfig,
) -> Result<Arc<dyn VocabBackend>, BackendError> {
    let backend: Arc<dyn VocabBackend> = match kind {
        BackendKind::Sqlite => Arc::new(SqliteBackend::open(&config.sqlite_path())?),
        BackendKind::JsonBlob => Arc::new(JsonBlobBackend::new(config.blob_path())),
    };
    Ok(backend)
}

/// Build the store from config; an unopenable primary is replaced by the other backend
pub fn open_store(config: &StorageConfig) -> Result<VocabularyStore, BackendError> {
    let primary_kind = config.primary;

    let primary = match open_backend(primary_kind, config) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::warn!(
                "Could not open {:?} backend, using {:?} only: {}",
                primary_kind,
                primary_kind.other(),
                e
            );
            let backend = open_backend(primary_kind.other(), config)?;
            return Ok(VocabularyStore::new(backend));
        }
    };

    let mut store = VocabularyStore::new(primary);
    if config.use_fallback {
        match open_backend(primary_kind.other(), config) {
            Ok(fallback) => {
                store = store
                    .with_fallback(fallback)
                    .with_mirror_writes(config.mirror_writes);
            }
            Err(e) => tracing::warn!("Fallback backend unavailable: {}", e),
        }
    }

    let (primary_name, fallback_name) = store.backend_names();
    tracing::info!(
        "Vocabulary store ready: primary={}, fallback={}",
        primary_name,
        fallback_name.unwrap_or("none")
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordnote_core::{DateKey, VocabEntry};

    fn config(dir: &tempfile::TempDir) -> StorageConfig {
        StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorageConfig::default()
        }
    }

    #[tokio::test]
    async fn default_config_pairs_sqlite_with_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&config(&dir)).unwrap();
        assert_eq!(store.backend_names(), ("sqlite", Some("json-blob")));

        let day = DateKey::from_ymd(2024, 6, 1).unwrap();
        store.add(VocabEntry::new(day, "cat", "고양이")).await.unwrap();
        assert!(dir.path().join("vocab.sqlite3").exists());
        assert!(dir.path().join("vocab_by_date.json").exists());
    }

    #[test]
    fn fallback_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            primary: BackendKind::JsonBlob,
            use_fallback: false,
            ..config(&dir)
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.backend_names(), ("json-blob", None));
    }

    #[test]
    fn unopenable_sqlite_falls_back_to_blob() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the database file should be
        std::fs::create_dir(dir.path().join("vocab.sqlite3")).unwrap();
        let store = open_store(&config(&dir)).unwrap();
        assert_eq!(store.backend_names(), ("json-blob", None));
    }
}
