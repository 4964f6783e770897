use unicode_normalization::UnicodeNormalization;

use crate::normalize::MAX_SOURCE_CHARS;

pub trait Preprocessor {
    // Default selection cleanup
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC)
        let text: String = text.nfkc().collect();

        // Selections spanning lines keep their word boundaries
        text.replace(['\n', '\r', '\t'], " ").trim().to_string()
    }

    /// Cleaned selection, or `None` when it is empty or too long to translate
    fn accept(&self, text: &str) -> Option<String> {
        let text = self.process(text);
        let len = text.chars().count();
        (1..=MAX_SOURCE_CHARS).contains(&len).then_some(text)
    }
}

pub struct SelectionPreprocessor;
impl Preprocessor for SelectionPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_flattens_lines() {
        let p = SelectionPreprocessor;
        assert_eq!(p.process("  machine\nlearning \r\n"), "machine learning");
    }

    #[test]
    fn applies_nfkc() {
        let p = SelectionPreprocessor;
        assert_eq!(p.process("ＡＢＣ"), "ABC");
    }

    #[test]
    fn accepts_only_bounded_selections() {
        let p = SelectionPreprocessor;
        assert_eq!(p.accept(" cat "), Some("cat".to_string()));
        assert_eq!(p.accept("   "), None);
        assert_eq!(p.accept(&"a".repeat(MAX_SOURCE_CHARS + 1)), None);
        assert!(p.accept(&"a".repeat(MAX_SOURCE_CHARS)).is_some());
    }
}
