use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use wordnote_core::{DateKey, VocabEntry};

use crate::backend::{BackendError, VocabBackend};

/// The serialized value: date key -> bucket in insertion order
type ByDate = BTreeMap<DateKey, Vec<VocabEntry>>;

/// Key-value blob store holding the whole by-date mapping as one JSON document
pub struct JsonBlobBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonBlobBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<ByDate, BackendError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(ByDate::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ByDate::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Atomic write: temp file in the same directory, then rename over the target
    fn save(&self, store: &ByDate) -> Result<(), BackendError> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, store)?;
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn upsert(store: &mut ByDate, entry: &VocabEntry) {
    let bucket = store.entry(entry.date_key).or_default();
    if let Some(existing) = bucket.iter_mut().find(|e| e.id == entry.id) {
        *existing = entry.clone();
        return;
    }

    // The record may have lived under another date
    remove_id(store, &entry.id);
    store.entry(entry.date_key).or_default().push(entry.clone());
}

fn remove_id(store: &mut ByDate, id: &str) -> bool {
    let mut removed = false;
    for bucket in store.values_mut() {
        let before = bucket.len();
        bucket.retain(|e| e.id != id);
        removed |= bucket.len() != before;
    }
    store.retain(|_, bucket| !bucket.is_empty());
    removed
}

#[async_trait]
impl VocabBackend for JsonBlobBackend {
    fn name(&self) -> &'static str {
        "json-blob"
    }

    async fn get(&self, id: &str) -> Result<Option<VocabEntry>, BackendError> {
        let store = self.load()?;
        Ok(store.into_values().flatten().find(|e| e.id == id))
    }

    async fn list_by_date(&self, date_key: DateKey) -> Result<Vec<VocabEntry>, BackendError> {
        let mut store = self.load()?;
        Ok(store.remove(&date_key).unwrap_or_default())
    }

    async fn list_all(&self) -> Result<Vec<VocabEntry>, BackendError> {
        let store = self.load()?;
        Ok(store.into_values().flatten().collect())
    }

    async fn put(&self, entry: &VocabEntry) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load()?;
        upsert(&mut store, entry);
        self.save(&store)
    }

    async fn delete(&self, id: &str) -> Result<bool, BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load()?;
        if !remove_id(&mut store, id) {
            return Ok(false);
        }
        self.save(&store)?;
        Ok(true)
    }

    async fn replace(&self, stale_ids: &[String], entry: &VocabEntry) -> Result<(), BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load()?;
        for id in stale_ids {
            remove_id(&mut store, id);
        }
        upsert(&mut store, entry);
        self.save(&store)
    }

    async fn rewrite(&self, old_id: &str, entry: &VocabEntry) -> Result<bool, BackendError> {
        let _guard = self.write_lock.lock().await;
        let mut store = self.load()?;

        let slot = store
            .get_mut(&entry.date_key)
            .and_then(|bucket| bucket.iter_mut().find(|e| e.id == old_id));
        match slot {
            Some(existing) => *existing = entry.clone(),
            None => {
                if !remove_id(&mut store, old_id) {
                    return Ok(false);
                }
                upsert(&mut store, entry);
            }
        }

        self.save(&store)?;
        Ok(true)
    }
}
