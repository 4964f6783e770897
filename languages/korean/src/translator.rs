use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wordnote_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslationsData,
}

#[derive(Deserialize)]
struct TranslationsData {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

/// Google Cloud Translation (v2) client
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let body = TranslateRequest {
            q: text,
            source: &from,
            target: &to,
            format: "text",
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Translation API returned {}: {}", status, body);
            return Err(TranslateError::ApiError(format!("HTTP {status}")));
        }

        let raw = response.text().await?;
        let translated_text = parse_translation(&raw)?;

        Ok(Translation {
            text: translated_text,
            from,
            to,
            provider: "google".to_string(),
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![
            ("en".to_string(), "ko".to_string()),
            ("ko".to_string(), "en".to_string()),
            ("ja".to_string(), "ko".to_string()),
            ("zh".to_string(), "ko".to_string()),
        ]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google Translate".to_string(),
            requires_api_key: true,
            offline: false,
        }
    }
}

fn parse_translation(raw: &str) -> Result<String, TranslateError> {
    let parsed: TranslateResponse = serde_json::from_str(raw)
        .map_err(|e| TranslateError::MalformedResponse(format!("Failed to parse response: {e}")))?;

    parsed
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| TranslateError::MalformedResponse("No translation in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_translation() {
        let raw = r#"{"data":{"translations":[{"translatedText":"고양이"},{"translatedText":"냥이"}]}}"#;
        assert_eq!(parse_translation(raw).unwrap(), "고양이");
    }

    #[test]
    fn empty_translation_list_is_malformed() {
        let raw = r#"{"data":{"translations":[]}}"#;
        assert!(matches!(
            parse_translation(raw),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[test]
    fn error_payload_is_malformed() {
        let raw = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        assert!(matches!(
            parse_translation(raw),
            Err(TranslateError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let t = GoogleTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let result = t.translate("cat", "en".to_string(), "ko".to_string()).await;
        assert!(matches!(result, Err(TranslateError::AuthenticationError)));
    }
}
