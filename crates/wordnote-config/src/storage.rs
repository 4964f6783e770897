use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Which persistence medium is tried first
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Per-record table with a date index
    #[default]
    Sqlite,
    /// Whole by-date map as one JSON document
    JsonBlob,
}

impl BackendKind {
    pub fn other(self) -> Self {
        match self {
            BackendKind::Sqlite => BackendKind::JsonBlob,
            BackendKind::JsonBlob => BackendKind::Sqlite,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Some(BackendKind::Sqlite),
            "json" | "json_blob" | "blob" => Some(BackendKind::JsonBlob),
            _ => None,
        }
    }
}

/// Relative to the wordnote root, see `StorageConfig::rooted_at`
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_sqlite_file() -> String {
    "vocab.sqlite3".to_string()
}

fn default_blob_file() -> String {
    "vocab_by_date.json".to_string()
}

fn default_use_fallback() -> bool {
    true
}

fn default_mirror_writes() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub primary: BackendKind,
    /// Retry failed operations on the other backend
    #[serde(default = "default_use_fallback")]
    pub use_fallback: bool,
    /// Replay successful writes on the fallback backend too
    #[serde(default = "default_mirror_writes")]
    pub mirror_writes: bool,
    #[serde(default = "default_sqlite_file")]
    pub sqlite_file: String,
    #[serde(default = "default_blob_file")]
    pub blob_file: String,
}

impl StorageConfig {
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = env::var("WORDNOTE_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(kind) = env::var("WORDNOTE_PRIMARY_BACKEND")
            .ok()
            .and_then(|v| BackendKind::parse(&v))
        {
            self.primary = kind;
        }

        self
    }

    /// Anchor a relative `data_dir` under `root` so every working directory sees one log
    pub fn rooted_at(mut self, root: &Path) -> Self {
        if self.data_dir.is_relative() {
            self.data_dir = root.join(&self.data_dir);
        }
        self
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(&self.sqlite_file)
    }

    pub fn blob_path(&self) -> PathBuf {
        self.data_dir.join(&self.blob_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            primary: BackendKind::default(),
            use_fallback: default_use_fallback(),
            mirror_writes: default_mirror_writes(),
            sqlite_file: default_sqlite_file(),
            blob_file: default_blob_file(),
        }
    }
}
