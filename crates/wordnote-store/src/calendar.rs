use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::broadcast;
use wordnote_core::{DateKey, EntryPatch, VocabEntry, YearMonth};

use crate::store::{AddOutcome, StoreError, StoreEvent, UpdateOutcome, VocabularyStore};

/// Entries saved on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub date_key: DateKey,
    pub entries: Vec<VocabEntry>,
}

impl DayView {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Per-day counts of one month, for drawing a calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub month: YearMonth,
    pub counts: BTreeMap<DateKey, usize>,
}

impl MonthView {
    pub fn count_for(&self, date_key: DateKey) -> usize {
        self.counts.get(&date_key).copied().unwrap_or(0)
    }

    pub fn active_days(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Every day of the month with its count, zero included
    pub fn grid(&self) -> Vec<(DateKey, usize)> {
        self.month
            .days()
            .map(|day| (day, self.count_for(day)))
            .collect()
    }
}

/// Read-side views over the store for the calendar and list UI
#[derive(Clone)]
pub struct VocabCalendar {
    store: Arc<VocabularyStore>,
}

impl VocabCalendar {
    pub fn new(store: Arc<VocabularyStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<VocabularyStore> {
        &self.store
    }

    pub async fn day(&self, date_key: DateKey) -> Result<DayView, StoreError> {
        let entries = self.store.list_by_date(date_key).await?;
        Ok(DayView { date_key, entries })
    }

    pub async fn month(&self, year: i32, month: u32) -> Result<MonthView, StoreError> {
        let counts = self.store.counts_by_month(year, month).await?;
        let month = YearMonth::new(year, month)?;
        Ok(MonthView { month, counts })
    }

    pub async fn add(
        &self,
        date_key: DateKey,
        source_text: &str,
        translated_text: &str,
    ) -> Result<AddOutcome, StoreError> {
        self.store
            .add(VocabEntry::new(date_key, source_text, translated_text))
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        date_key: DateKey,
        patch: &EntryPatch,
    ) -> Result<UpdateOutcome, StoreError> {
        self.store.update(id, date_key, patch).await
    }

    pub async fn remove(&self, id: &str, date_key: DateKey) -> Result<bool, StoreError> {
        self.store.remove(id, date_key).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteBackend;

    fn calendar() -> VocabCalendar {
        let backend = Arc::new(SqliteBackend::open_in_memory().unwrap());
        VocabCalendar::new(Arc::new(VocabularyStore::new(backend)))
    }

    fn feb(d: u32) -> DateKey {
        DateKey::from_ymd(2024, 2, d).unwrap()
    }

    #[tokio::test]
    async fn day_view_lists_saved_entries() {
        let calendar = calendar();
        calendar.add(feb(3), "dog", "개").await.unwrap();
        calendar.add(feb(3), "cat", "고양이").await.unwrap();

        let view = calendar.day(feb(3)).await.unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.entries[1].translated_text, "고양이");
        assert!(calendar.day(feb(4)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn month_grid_covers_every_day() {
        let calendar = calendar();
        calendar.add(feb(1), "dog", "개").await.unwrap();
        calendar.add(feb(29), "cat", "고양이").await.unwrap();
        calendar.add(feb(29), "sun", "태양").await.unwrap();

        let view = calendar.month(2024, 2).await.unwrap();
        let grid = view.grid();
        assert_eq!(grid.len(), 29);
        assert_eq!(grid[0], (feb(1), 1));
        assert_eq!(grid[1], (feb(2), 0));
        assert_eq!(grid[28], (feb(29), 2));
        assert_eq!(view.active_days(), 2);
        assert_eq!(view.total(), 3);
    }

    #[tokio::test]
    async fn month_rejects_invalid_month() {
        assert!(calendar().month(2024, 0).await.is_err());
    }

    #[tokio::test]
    async fn writes_are_forwarded_and_observable() {
        let calendar = calendar();
        let mut events = calendar.subscribe();

        calendar.add(feb(5), "cat", "고양이").await.unwrap();
        let id = calendar.day(feb(5)).await.unwrap().entries[0].id.clone();

        let patch = EntryPatch {
            source_text: Some("kitty".to_string()),
            ..Default::default()
        };
        let UpdateOutcome::Updated { entry, .. } = calendar.update(&id, feb(5), &patch).await.unwrap()
        else {
            panic!("edit was rejected");
        };
        assert!(!calendar.remove(&id, feb(5)).await.unwrap());
        assert!(calendar.remove(&entry.id, feb(5)).await.unwrap());

        let mut seen = Vec::new();
        while let Ok(event) = events.try_recv() {
            seen.push(event.change);
        }
        assert_eq!(
            seen,
            vec![
                crate::store::ChangeKind::Added,
                crate::store::ChangeKind::Updated,
                crate::store::ChangeKind::Removed
            ]
        );
    }
}
