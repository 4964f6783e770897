use std::collections::HashMap;

use wordnote_core::dictionary::{Dictionary, DictionaryMetadata};

const ENTRIES: &[(&str, &str)] = &[
    // Function words
    ("the", "그"),
    ("and", "그리고"),
    ("or", "또는"),
    ("but", "하지만"),
    ("in", "~에"),
    ("on", "~위에"),
    ("at", "~에서"),
    ("to", "~에게"),
    ("for", "~를 위해"),
    ("of", "~의"),
    ("with", "~와 함께"),
    ("by", "~에 의해"),
    // Technology
    ("artificial", "인공의"),
    ("intelligence", "지능"),
    ("machine", "기계"),
    ("learning", "학습"),
    ("algorithm", "알고리즘"),
    ("data", "데이터"),
    ("technology", "기술"),
    ("computer", "컴퓨터"),
    ("software", "소프트웨어"),
    ("application", "애플리케이션"),
    ("website", "웹사이트"),
    ("internet", "인터넷"),
    ("network", "네트워크"),
    ("system", "시스템"),
    ("programming", "프로그래밍"),
    ("development", "개발"),
    ("innovation", "혁신"),
    ("research", "연구"),
    // General
    ("information", "정보"),
    ("important", "중요한"),
    ("different", "다른"),
    ("example", "예시"),
    ("question", "질문"),
    ("answer", "답변"),
    ("problem", "문제"),
    ("solution", "해결책"),
    ("person", "사람"),
    ("people", "사람들"),
    ("time", "시간"),
    ("work", "일하다"),
    ("make", "만들다"),
    ("use", "사용하다"),
    ("get", "얻다"),
    ("know", "알다"),
    ("good", "좋은"),
    ("new", "새로운"),
    ("first", "첫 번째"),
    ("great", "훌륭한"),
    // Business
    ("business", "사업"),
    ("company", "회사"),
    ("service", "서비스"),
    ("product", "제품"),
    ("market", "시장"),
    ("customer", "고객"),
    ("user", "사용자"),
    ("management", "관리"),
];

/// Fixed English to Korean word table backing the offline translator
pub struct EnglishKoreanDictionary {
    words: HashMap<&'static str, &'static str>,
}

impl EnglishKoreanDictionary {
    pub fn new() -> Self {
        Self {
            words: ENTRIES.iter().copied().collect(),
        }
    }

    pub fn entry_count(&self) -> usize {
        self.words.len()
    }
}

impl Default for EnglishKoreanDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary for EnglishKoreanDictionary {
    fn lookup_exact(&self, word: &str) -> Option<&str> {
        self.words.get(word).copied()
    }

    fn metadata(&self) -> DictionaryMetadata {
        DictionaryMetadata {
            name: "Basic English-Korean".to_string(),
            source_language: "en".to_string(),
            target_language: "ko".to_string(),
            entry_count: self.words.len(),
        }
    }
}
