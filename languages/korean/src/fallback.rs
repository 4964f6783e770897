use std::time::Duration;

use async_trait::async_trait;
use wordnote_core::dictionary::Dictionary;
use wordnote_core::normalize::UNTRANSLATED_MARKER;
use wordnote_translator::{
    LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};

use crate::dictionary::EnglishKoreanDictionary;

pub const PLURAL_SUFFIX: &str = "들";
pub const GERUND_SUFFIX: &str = "하는";

const PROVIDER_NAME: &str = "fallback-dictionary";

/// Offline word substitution translator, used when the API is missing or failing
pub struct FallbackTranslator {
    dictionary: EnglishKoreanDictionary,
    latency: Duration,
}

impl FallbackTranslator {
    pub fn new(latency: Duration) -> Self {
        Self {
            dictionary: EnglishKoreanDictionary::new(),
            latency,
        }
    }

    /// Deterministic lookup; the first matching rule wins:
    ///
    /// 1. exact dictionary word (case-insensitive)
    /// 2. trailing `s` dropped, Korean plural `들` appended
    /// 3. trailing `ing` dropped, `하는` appended
    /// 4. text with spaces: word by word, unknown words kept as typed
    /// 5. otherwise the quoted text with the "needs translation" marker
    pub fn translate_text(&self, text: &str) -> String {
        let lower = text.trim().to_lowercase();

        if let Some(word) = self.dictionary.lookup_exact(&lower) {
            return word.to_string();
        }

        // Plural
        if let Some(word) = lower
            .strip_suffix('s')
            .and_then(|singular| self.dictionary.lookup_exact(singular))
        {
            return format!("{word}{PLURAL_SUFFIX}");
        }

        // -ing form
        if let Some(word) = lower
            .strip_suffix("ing")
            .and_then(|stem| self.dictionary.lookup_exact(stem))
        {
            return format!("{word}{GERUND_SUFFIX}");
        }

        // Sentences go word by word, unknown words stay as they are
        if text.contains(' ') {
            return text
                .split(' ')
                .map(|word| {
                    let clean: String = word
                        .to_lowercase()
                        .chars()
                        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                        .collect();
                    self.dictionary
                        .lookup_exact(&clean)
                        .map(str::to_string)
                        .unwrap_or_else(|| word.to_string())
                })
                .collect::<Vec<_>>()
                .join(" ");
        }

        format!("\"{text}\" {UNTRANSLATED_MARKER}")
    }
}

impl Default for FallbackTranslator {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

#[async_trait]
impl Translator for FallbackTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        Ok(Translation {
            text: self.translate_text(text),
            from,
            to,
            provider: PROVIDER_NAME.to_string(),
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        vec![("en".to_string(), "ko".to_string())]
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: PROVIDER_NAME.to_string(),
            requires_api_key: false,
            offline: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> FallbackTranslator {
        FallbackTranslator::new(Duration::ZERO)
    }

    #[test]
    fn translation_table() {
        let t = translator();
        let cases = [
            ("the", "그"),
            ("The", "그"),
            ("  computer ", "컴퓨터"),
            ("computers", "컴퓨터들"),
            ("learning", "학습"),
            ("working", "일하다하는"),
            ("machine learning", "기계 학습"),
            ("Data, and people!", "데이터 그리고 사람들"),
            ("hello world", "hello world"),
            ("hello computer", "hello 컴퓨터"),
            ("zebra", "\"zebra\" (번역 필요)"),
        ];

        for (input, expected) in cases {
            assert_eq!(t.translate_text(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn exact_match_beats_morphology() {
        // "people" is itself an entry, "users" goes through the plural rule
        let t = translator();
        assert_eq!(t.translate_text("people"), "사람들");
        assert_eq!(t.translate_text("users"), "사용자들");
    }

    #[test]
    fn unknown_stems_are_marked() {
        let t = translator();
        assert_eq!(t.translate_text("singing"), "\"singing\" (번역 필요)");
        assert_eq!(t.translate_text("bus"), "\"bus\" (번역 필요)");
    }

    #[tokio::test]
    async fn translator_impl_never_fails() {
        let t = translator();
        let translation = t
            .translate("zebra", "en".to_string(), "ko".to_string())
            .await
            .unwrap();
        assert_eq!(translation.provider, PROVIDER_NAME);
        assert!(translation.text.ends_with(UNTRANSLATED_MARKER));
        assert!(t.metadata().offline);
    }
}
