use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use wordnote_core::{DateKey, VocabEntry, YearMonth};

use crate::backend::{BackendError, VocabBackend};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS vocab (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    id              TEXT NOT NULL UNIQUE,
    date_key        TEXT NOT NULL,
    source_text     TEXT NOT NULL,
    translated_text TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS vocab_by_date ON vocab(date_key);
";

const SELECT_COLUMNS: &str = "SELECT id, date_key, source_text, translated_text FROM vocab";

/// Structured per-record store: one row per entry, indexed by date
///
/// rusqlite is synchronous, so every call runs on the blocking pool.
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        tracing::info!("Opening SQLite vocabulary store: {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, BackendError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, BackendError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, job: F) -> Result<T, BackendError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, BackendError> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| BackendError::Unavailable("sqlite connection poisoned".to_string()))?;
            job(&mut conn)
        })
        .await
        .map_err(|e| BackendError::Unavailable(format!("sqlite task failed: {e}")))?
    }
}

fn read_entry(row: &Row<'_>) -> rusqlite::Result<VocabEntry> {
    let raw_key: String = row.get(1)?;
    let date_key = raw_key
        .parse::<DateKey>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

    Ok(VocabEntry {
        id: row.get(0)?,
        date_key,
        source_text: row.get(2)?,
        translated_text: row.get(3)?,
    })
}

fn upsert(conn: &Connection, entry: &VocabEntry) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO vocab (id, date_key, source_text, translated_text)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO UPDATE SET
             date_key = excluded.date_key,
             source_text = excluded.source_text,
             translated_text = excluded.translated_text",
        params![
            entry.id,
            entry.date_key.to_string(),
            entry.source_text,
            entry.translated_text
        ],
    )
}

#[async_trait]
impl VocabBackend for SqliteBackend {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, id: &str) -> Result<Option<VocabEntry>, BackendError> {
        let id = id.to_string();
        self.run(move |conn| {
            let entry = conn
                .query_row(
                    &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                    params![id],
                    read_entry,
                )
                .optional()?;
            Ok(entry)
        })
        .await
    }

    async fn list_by_date(&self, date_key: DateKey) -> Result<Vec<VocabEntry>, BackendError> {
        self.run(move |conn| {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} WHERE date_key = ?1 ORDER BY seq"))?;
            let entries = stmt
                .query_map(params![date_key.to_string()], read_entry)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<VocabEntry>, BackendError> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY date_key, seq"))?;
            let entries = stmt
                .query_map([], read_entry)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
        .await
    }

    async fn put(&self, entry: &VocabEntry) -> Result<(), BackendError> {
        let entry = entry.clone();
        self.run(move |conn| {
            upsert(conn, &entry)?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<bool, BackendError> {
        let id = id.to_string();
        self.run(move |conn| {
            let removed = conn.execute("DELETE FROM vocab WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }

    async fn replace(&self, stale_ids: &[String], entry: &VocabEntry) -> Result<(), BackendError> {
        let stale_ids = stale_ids.to_vec();
        let entry = entry.clone();
        self.run(move |conn| {
            let tx = conn.transaction()?;
            for id in &stale_ids {
                tx.execute("DELETE FROM vocab WHERE id = ?1", params![id])?;
            }
            upsert(&tx, &entry)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn rewrite(&self, old_id: &str, entry: &VocabEntry) -> Result<bool, BackendError> {
        let old_id = old_id.to_string();
        let entry = entry.clone();
        self.run(move |conn| {
            // Same row, so `seq` and the bucket position survive the id change
            let changed = conn.execute(
                "UPDATE vocab SET id = ?1, date_key = ?2, source_text = ?3, translated_text = ?4
                 WHERE id = ?5",
                params![
                    entry.id,
                    entry.date_key.to_string(),
                    entry.source_text,
                    entry.translated_text,
                    old_id
                ],
            )?;
            Ok(changed > 0)
        })
        .await
    }

    async fn count_by_month(
        &self,
        month: YearMonth,
    ) -> Result<BTreeMap<DateKey, usize>, BackendError> {
        let pattern = format!("{}%", month.key_prefix());
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT date_key, COUNT(*) FROM vocab WHERE date_key LIKE ?1 GROUP BY date_key",
            )?;

            let mut counts = BTreeMap::new();
            let rows = stmt.query_map(params![pattern], |row| {
                let raw_key: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((raw_key, count))
            })?;
            for row in rows {
                let (raw_key, count) = row?;
                match raw_key.parse::<DateKey>() {
                    Ok(date_key) => {
                        counts.insert(date_key, count.max(0) as usize);
                    }
                    Err(e) => tracing::warn!("Skipping unreadable date key in sqlite store: {e}"),
                }
            }
            Ok(counts)
        })
        .await
    }
}
