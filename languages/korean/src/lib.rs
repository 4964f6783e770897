pub mod dictionary;
pub mod fallback;
pub mod translator;

pub use dictionary::EnglishKoreanDictionary;
pub use fallback::FallbackTranslator;
pub use translator::GoogleTranslator;
