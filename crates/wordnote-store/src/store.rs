use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use wordnote_core::{CoreError, DateKey, EntryPatch, VocabEntry, YearMonth, is_valid_translation};

use crate::backend::{BackendError, VocabBackend};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("All storage backends failed (last tried {backend}): {source}")]
    AllBackendsFailed {
        backend: &'static str,
        #[source]
        source: BackendError,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result of a save request; only `Saved` changed anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Saved {
        entry: VocabEntry,
        /// Ids of same-day entries for the same source text that were replaced
        replaced: Vec<String>,
    },
    /// Empty, placeholder or no-op translation
    Invalid,
    /// Same id already stored
    AlreadyStored,
    /// Same normalized pair stored under some date
    DuplicatePair,
}

impl AddOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, AddOutcome::Saved { .. })
    }
}

/// Result of an edit; only `Updated` changed anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated {
        entry: VocabEntry,
        /// Id the record had before the edit
        previous_id: String,
    },
    /// No entry with that id in the bucket
    NotFound,
    /// Edited text is empty, a placeholder or a no-op translation
    Invalid,
    /// Another entry already holds the edited normalized pair
    DuplicatePair,
    /// Another entry of the same day already has the edited source text
    SourceTaken,
}

impl UpdateOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// Emitted after every successful mutation so views can re-query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    pub date_key: DateKey,
    pub change: ChangeKind,
}

/// Owns vocabulary persistence: identity, dedup and date queries
pub struct VocabularyStore {
    primary: Arc<dyn VocabBackend>,
    fallback: Option<Arc<dyn VocabBackend>>,
    mirror_writes: bool,
    events: broadcast::Sender<StoreEvent>,
}

impl VocabularyStore {
    pub fn new(primary: Arc<dyn VocabBackend>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            primary,
            fallback: None,
            mirror_writes: false,
            events,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn VocabBackend>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Also apply successful primary writes to the fallback backend
    pub fn with_mirror_writes(mut self, mirror: bool) -> Self {
        self.mirror_writes = mirror;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn backend_names(&self) -> (&'static str, Option<&'static str>) {
        (self.primary.name(), self.fallback.as_ref().map(|b| b.name()))
    }

    /// Deduplicated insert; rejections are reported through the outcome, not as errors
    pub async fn add(&self, entry: VocabEntry) -> Result<AddOutcome, StoreError> {
        if !is_valid_translation(&entry.source_text, &entry.translated_text) {
            tracing::debug!("Rejected invalid translation for '{}'", entry.source_text);
            return Ok(AddOutcome::Invalid);
        }

        // Ids are derived, never trusted from the caller
        let entry = VocabEntry::new(entry.date_key, entry.source_text, entry.translated_text);

        let (outcome, on_primary) = match add_on(self.primary.as_ref(), &entry).await {
            Ok(outcome) => (outcome, true),
            Err(e) => {
                let fallback = self.fallback_after(e)?;
                let outcome = add_on(fallback, &entry)
                    .await
                    .map_err(|e| exhausted(fallback, e))?;
                (outcome, false)
            }
        };

        if let AddOutcome::Saved { entry, replaced } = &outcome {
            if on_primary {
                if let Some(mirror) = self.mirror() {
                    if let Err(e) = mirror.replace(replaced, entry).await {
                        tracing::warn!("Mirror write to {} failed: {}", mirror.name(), e);
                    }
                }
            }
            tracing::info!(
                "Saved '{}' => '{}' on {}",
                entry.source_text,
                entry.translated_text,
                entry.date_key
            );
            self.notify(entry.date_key, ChangeKind::Added);
        } else {
            tracing::debug!("Skipped save: {:?}", outcome);
        }

        Ok(outcome)
    }

    /// Merge `patch` onto the entry `id` of the `date_key` bucket.
    ///
    /// The edited record goes through the same validity and dedup rules as `add`
    /// and gets the id derived from its new text, keeping its place in the bucket.
    pub async fn update(
        &self,
        id: &str,
        date_key: DateKey,
        patch: &EntryPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        let primary = update_on(self.primary.as_ref(), id, date_key, patch).await;
        let (outcome, on_primary) = match primary {
            Ok(outcome) => (outcome, true),
            Err(e) => {
                let fallback = self.fallback_after(e)?;
                let outcome = update_on(fallback, id, date_key, patch)
                    .await
                    .map_err(|e| exhausted(fallback, e))?;
                (outcome, false)
            }
        };

        if !outcome.is_updated() {
            tracing::debug!("Update of {id} on {date_key} skipped: {:?}", outcome);
            return Ok(outcome);
        }

        if let (true, Some(mirror)) = (on_primary, self.mirror()) {
            if let UpdateOutcome::Updated { entry, previous_id } = &outcome {
                if let Err(e) = mirror.rewrite(previous_id, entry).await {
                    tracing::warn!("Mirror write to {} failed: {}", mirror.name(), e);
                }
            }
        }

        self.notify(date_key, ChangeKind::Updated);
        Ok(outcome)
    }

    /// Delete entry `id` from the `date_key` bucket; `false` when absent
    pub async fn remove(&self, id: &str, date_key: DateKey) -> Result<bool, StoreError> {
        let (removed, on_primary) = match remove_on(self.primary.as_ref(), id, date_key).await {
            Ok(removed) => (removed, true),
            Err(e) => {
                let fallback = self.fallback_after(e)?;
                let removed = remove_on(fallback, id, date_key)
                    .await
                    .map_err(|e| exhausted(fallback, e))?;
                (removed, false)
            }
        };

        if !removed {
            tracing::debug!("Remove skipped, {id} not found on {date_key}");
            return Ok(false);
        }

        if on_primary {
            if let Some(mirror) = self.mirror() {
                if let Err(e) = mirror.delete(id).await {
                    tracing::warn!("Mirror delete on {} failed: {}", mirror.name(), e);
                }
            }
        }

        self.notify(date_key, ChangeKind::Removed);
        Ok(true)
    }

    /// All entries of one day in insertion order
    pub async fn list_by_date(&self, date_key: DateKey) -> Result<Vec<VocabEntry>, StoreError> {
        match self.primary.list_by_date(date_key).await {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let fallback = self.fallback_after(e)?;
                fallback
                    .list_by_date(date_key)
                    .await
                    .map_err(|e| exhausted(fallback, e))
            }
        }
    }

    /// Entry count per day of the month, only days that have entries
    pub async fn counts_by_month(
        &self,
        year: i32,
        month: u32,
    ) -> Result<BTreeMap<DateKey, usize>, StoreError> {
        let month = YearMonth::new(year, month)?;
        match self.primary.count_by_month(month).await {
            Ok(counts) => Ok(counts),
            Err(e) => {
                let fallback = self.fallback_after(e)?;
                fallback
                    .count_by_month(month)
                    .await
                    .map_err(|e| exhausted(fallback, e))
            }
        }
    }

    fn fallback_after(&self, error: BackendError) -> Result<&dyn VocabBackend, StoreError> {
        match &self.fallback {
            Some(fallback) => {
                tracing::warn!(
                    "{} backend failed, retrying on {}: {}",
                    self.primary.name(),
                    fallback.name(),
                    error
                );
                Ok(fallback.as_ref())
            }
            None => Err(exhausted(self.primary.as_ref(), error)),
        }
    }

    fn mirror(&self) -> Option<&dyn VocabBackend> {
        if self.mirror_writes {
            self.fallback.as_deref()
        } else {
            None
        }
    }

    fn notify(&self, date_key: DateKey, change: ChangeKind) {
        // No subscribers is fine
        let _ = self.events.send(StoreEvent { date_key, change });
    }
}

fn exhausted(backend: &dyn VocabBackend, source: BackendError) -> StoreError {
    tracing::error!("{} backend failed: {}", backend.name(), source);
    StoreError::AllBackendsFailed {
        backend: backend.name(),
        source,
    }
}

async fn add_on(
    backend: &dyn VocabBackend,
    entry: &VocabEntry,
) -> Result<AddOutcome, BackendError> {
    if backend.get(&entry.id).await?.is_some() {
        return Ok(AddOutcome::AlreadyStored);
    }

    let pair = entry.pair_key();
    let all = backend.list_all().await?;
    if all.iter().any(|existing| existing.pair_key() == pair) {
        return Ok(AddOutcome::DuplicatePair);
    }

    // Latest translation wins per source text per day
    let replaced: Vec<String> = all
        .into_iter()
        .filter(|existing| {
            existing.date_key == entry.date_key && existing.source_text == entry.source_text
        })
        .map(|existing| existing.id)
        .collect();

    backend.replace(&replaced, entry).await?;

    Ok(AddOutcome::Saved {
        entry: entry.clone(),
        replaced,
    })
}

async fn update_on(
    backend: &dyn VocabBackend,
    id: &str,
    date_key: DateKey,
    patch: &EntryPatch,
) -> Result<UpdateOutcome, BackendError> {
    let bucket = backend.list_by_date(date_key).await?;
    let Some(current) = bucket.iter().find(|e| e.id == id) else {
        return Ok(UpdateOutcome::NotFound);
    };

    let entry = patch.merged(current);
    if !is_valid_translation(&entry.source_text, &entry.translated_text) {
        return Ok(UpdateOutcome::Invalid);
    }

    let pair = entry.pair_key();
    let all = backend.list_all().await?;
    if all
        .iter()
        .any(|existing| existing.id != id && existing.pair_key() == pair)
    {
        return Ok(UpdateOutcome::DuplicatePair);
    }

    if bucket
        .iter()
        .any(|existing| existing.id != id && existing.source_text == entry.source_text)
    {
        return Ok(UpdateOutcome::SourceTaken);
    }

    if !backend.rewrite(id, &entry).await? {
        return Ok(UpdateOutcome::NotFound);
    }

    Ok(UpdateOutcome::Updated {
        entry,
        previous_id: id.to_string(),
    })
}

async fn remove_on(
    backend: &dyn VocabBackend,
    id: &str,
    date_key: DateKey,
) -> Result<bool, BackendError> {
    let bucket = backend.list_by_date(date_key).await?;
    if !bucket.iter().any(|e| e.id == id) {
        return Ok(false);
    }
    backend.delete(id).await
}
