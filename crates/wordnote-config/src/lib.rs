use serde::{Deserialize, Serialize};

use self::storage::StorageConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod storage;
pub mod translator;
pub mod ui;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,

    /// Capacity of the app <-> ui event channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Self::default().with_env()
    }

    pub fn with_env(self) -> Self {
        Config {
            translator: self.translator.with_env(),
            storage: self.storage.with_env(),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            translator: TranslatorConfig::default(),
            storage: StorageConfig::default(),
            ui: UiConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
