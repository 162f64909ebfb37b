// src/i18n/cache.rs
use std::collections::HashMap;

/// Resolved-string cache owned by a single resolver.
pub struct TranslationCache {
    entries: HashMap<String, String>,
    hits: usize,
    misses: usize,
    max_size: usize,
}

impl TranslationCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
            max_size: max_size.max(1),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<String> {
        if let Some(value) = self.entries.get(key) {
            self.hits += 1;
            Some(value.clone())
        } else {
            self.misses += 1;
            None
        }
    }

    pub fn insert(&mut self, key: String, value: String) {
        if self.entries.len() >= self.max_size {
            self.entries.clear();
            log::debug!("Translation cache cleared due to size limit");
        }
        self.entries.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses)
    pub fn stats(&self) -> (usize, usize) {
        (self.hits, self.misses)
    }
}
