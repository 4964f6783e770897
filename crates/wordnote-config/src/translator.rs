use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "ko".to_string()
}

fn default_api_url() -> String {
    "https://translation.googleapis.com/language/translate/v2".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_fallback_latency_ms() -> u64 {
    300
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Without a key only the offline dictionary is used
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Upper bound for one API call before falling back
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Simulated delay of the offline dictionary
    #[serde(default = "default_fallback_latency_ms")]
    pub fallback_latency_ms: u64,
}

impl TranslatorConfig {
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = env::var("GOOGLE_TRANSLATE_API_KEY") {
            self.api_key = key;
        }

        if let Some(timeout_ms) = env::var("TRANSLATE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_ms = timeout_ms;
        }

        if let Some(latency) = env::var("FALLBACK_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.fallback_latency_ms = latency;
        }

        self
    }

    /// Whether a remote provider should be constructed
    pub fn remote_enabled(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            fallback_latency_ms: default_fallback_latency_ms(),
        }
    }
}
