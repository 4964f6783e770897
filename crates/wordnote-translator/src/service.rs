use std::sync::Arc;
use std::time::Duration;

use crate::{LanguageCode, TranslateError, Translation, Translator};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Remote provider first, offline fallback on any failure
pub struct TranslationService {
    primary: Option<Arc<dyn Translator>>,
    fallback: Arc<dyn Translator>,
    from: LanguageCode,
    to: LanguageCode,
    timeout: Duration,
}

impl TranslationService {
    pub fn new(fallback: Arc<dyn Translator>, from: LanguageCode, to: LanguageCode) -> Self {
        Self {
            primary: None,
            fallback,
            from,
            to,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn Translator>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// Errors only when the fallback itself fails
    pub async fn translate(&self, text: &str) -> Result<Translation, TranslateError> {
        if let Some(primary) = &self.primary {
            match self.translate_remote(primary.as_ref(), text).await {
                Ok(translation) => return Ok(translation),
                Err(e) => {
                    tracing::warn!(
                        "{} translation failed, using fallback: {}",
                        primary.metadata().name,
                        e
                    );
                }
            }
        }

        self.fallback
            .translate(text, self.from.clone(), self.to.clone())
            .await
    }

    async fn translate_remote(
        &self,
        translator: &dyn Translator,
        text: &str,
    ) -> Result<Translation, TranslateError> {
        let request = translator.translate(text, self.from.clone(), self.to.clone());
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(TranslateError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderMetadata;

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl Translator for Fixed {
        async fn translate(
            &self,
            _text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            Ok(Translation {
                text: self.0.to_string(),
                from,
                to,
                provider: self.0.to_string(),
            })
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: self.0.to_string(),
                requires_api_key: false,
                offline: true,
            }
        }
    }

    struct Failing;

    #[async_trait::async_trait]
    impl Translator for Failing {
        async fn translate(
            &self,
            _text: &str,
            _from: LanguageCode,
            _to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            Err(TranslateError::ApiError("HTTP 500".to_string()))
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "failing".to_string(),
                requires_api_key: true,
                offline: false,
            }
        }
    }

    struct Hanging;

    #[async_trait::async_trait]
    impl Translator for Hanging {
        async fn translate(
            &self,
            _text: &str,
            _from: LanguageCode,
            _to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(TranslateError::ApiError("unreachable".to_string()))
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![]
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "hanging".to_string(),
                requires_api_key: true,
                offline: false,
            }
        }
    }

    fn service(fallback: &'static str) -> TranslationService {
        TranslationService::new(Arc::new(Fixed(fallback)), "en".into(), "ko".into())
    }

    #[tokio::test]
    async fn uses_primary_when_it_succeeds() {
        let service = service("fallback").with_primary(Arc::new(Fixed("remote")));
        let translation = service.translate("cat").await.unwrap();
        assert_eq!(translation.provider, "remote");
        assert_eq!(translation.from, "en");
        assert_eq!(translation.to, "ko");
    }

    #[tokio::test]
    async fn falls_back_on_api_error() {
        let service = service("fallback").with_primary(Arc::new(Failing));
        let translation = service.translate("cat").await.unwrap();
        assert_eq!(translation.provider, "fallback");
    }

    #[tokio::test]
    async fn falls_back_on_timeout() {
        let service = service("fallback")
            .with_primary(Arc::new(Hanging))
            .with_timeout(Duration::from_millis(20));

        let result =
            tokio::time::timeout(Duration::from_secs(2), service.translate("cat")).await;
        let translation = result.expect("service hung").unwrap();
        assert_eq!(translation.provider, "fallback");
    }

    #[tokio::test]
    async fn without_primary_goes_straight_to_fallback() {
        let service = service("fallback");
        assert!(!service.has_primary());
        assert_eq!(service.translate("cat").await.unwrap().text, "fallback");
    }
}
