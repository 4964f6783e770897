use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use wordnote_config::Config;
use wordnote_config::translator::TranslatorConfig;
use wordnote_core::DateKey;
use wordnote_lang_korean::{FallbackTranslator, GoogleTranslator};
use wordnote_store::{VocabCalendar, open_store};
use wordnote_translator::TranslationService;
use tokio::sync::RwLock;

use crate::status::AppStatus;

/// Everything the capture flow and the views share for one session
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub profile: String,
    pub profile_root: PathBuf,
    pub translator: Arc<TranslationService>,
    pub calendar: VocabCalendar,
    pub status: AppStatus,
    /// Day currently shown by the UI, refreshed on store updates
    pub current_day: RwLock<Option<DateKey>>,
}

impl AppState {
    pub fn init(profile: &str, profile_root: PathBuf, mut config: Config) -> anyhow::Result<Self> {
        config.storage = config.storage.rooted_at(&profile_root);
        let translator = build_translator(&config.translator);
        let store = open_store(&config.storage)?;

        tracing::info!(
            "Session ready (profile {}, remote translation {})",
            profile,
            if translator.has_primary() { "on" } else { "off" }
        );

        Ok(Self::with_parts(
            config,
            profile,
            profile_root,
            translator,
            VocabCalendar::new(Arc::new(store)),
        ))
    }

    pub fn with_parts(
        config: Config,
        profile: &str,
        profile_root: PathBuf,
        translator: TranslationService,
        calendar: VocabCalendar,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            profile: profile.to_string(),
            profile_root,
            translator: Arc::new(translator),
            calendar,
            status: AppStatus::new(),
            current_day: RwLock::new(None),
        }
    }

    pub async fn shutdown(&self) {
        let status = self.status.capture.read().await;
        tracing::info!("Session closed: {}", status.summary());
    }
}

pub fn build_translator(config: &TranslatorConfig) -> TranslationService {
    let fallback = Arc::new(FallbackTranslator::new(Duration::from_millis(
        config.fallback_latency_ms,
    )));
    let service = TranslationService::new(fallback, config.from_lang.clone(), config.to_lang.clone())
        .with_timeout(Duration::from_millis(config.timeout_ms));

    if config.remote_enabled() {
        service.with_primary(Arc::new(GoogleTranslator::new(
            config.api_key.clone(),
            config.api_url.clone(),
        )))
    } else {
        tracing::warn!("No translation API key, using the offline dictionary only");
        service
    }
}
