/// Word-to-word dictionary lookup operations
pub trait Dictionary: Send + Sync {
    /// Look up an already lower-cased word
    fn lookup_exact(&self, word: &str) -> Option<&str>;

    fn contains(&self, word: &str) -> bool {
        self.lookup_exact(word).is_some()
    }

    /// Get dictionary metadata
    fn metadata(&self) -> DictionaryMetadata;
}

#[derive(Debug, Clone)]
pub struct DictionaryMetadata {
    pub name: String,
    pub source_language: String,
    pub target_language: String,
    pub entry_count: usize,
}
