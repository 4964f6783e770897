/// Suffix the fallback translator appends when it has no answer
pub const UNTRANSLATED_MARKER: &str = "(번역 필요)";

/// Text shown when no translator produced a result at all
pub const TRANSLATION_ERROR_TEXT: &str = "번역 중 오류가 발생했습니다";

/// Longest selection (in chars) that is translated and stored
pub const MAX_SOURCE_CHARS: usize = 200;

const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Comparison form used for duplicate detection
pub fn normalize(text: &str) -> String {
    let visible: String = text.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect();

    visible
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a translation result is worth keeping in the vocabulary log
pub fn is_valid_translation(source: &str, translated: &str) -> bool {
    let source = source.trim();
    let translated = translated.trim();

    if source.is_empty() || translated.is_empty() {
        return false;
    }

    if source.chars().count() > MAX_SOURCE_CHARS {
        return false;
    }

    if is_placeholder(translated) {
        return false;
    }

    let normalized = normalize(translated);
    !normalized.is_empty() && normalized != normalize(source)
}

fn is_placeholder(translated: &str) -> bool {
    translated.ends_with(UNTRANSLATED_MARKER) || translated == TRANSLATION_ERROR_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_whitespace() {
        assert_eq!(normalize("  Cat  "), "cat");
        assert_eq!(normalize("Machine\t\n  Learning"), "machine learning");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn normalize_strips_zero_width_chars() {
        assert_eq!(normalize("c\u{200B}at"), "cat");
        assert_eq!(normalize("\u{FEFF}Cat\u{200D}"), "cat");
        assert_eq!(normalize("고\u{200C}양이"), "고양이");
    }

    #[test]
    fn valid_translation() {
        assert!(is_valid_translation("cat", "고양이"));
        assert!(is_valid_translation("  machine learning ", "기계 학습"));
    }

    #[test]
    fn rejects_empty_sides() {
        assert!(!is_valid_translation("", "x"));
        assert!(!is_valid_translation("   ", "x"));
        assert!(!is_valid_translation("cat", "  "));
    }

    #[test]
    fn rejects_noop_translation() {
        assert!(!is_valid_translation("cat", "cat"));
        assert!(!is_valid_translation("Cat", " cat "));
        assert!(!is_valid_translation("hello world", "hello\u{200B} world"));
    }

    #[test]
    fn rejects_placeholders() {
        assert!(!is_valid_translation("zebra", "\"zebra\" (번역 필요)"));
        assert!(!is_valid_translation("zebra", TRANSLATION_ERROR_TEXT));
    }

    #[test]
    fn rejects_overlong_source() {
        let long = "a".repeat(MAX_SOURCE_CHARS + 1);
        assert!(!is_valid_translation(&long, "에이"));
        let limit = "가".repeat(MAX_SOURCE_CHARS);
        assert!(is_valid_translation(&limit, "ga"));
    }
}
