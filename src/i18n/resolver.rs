// src/i18n/resolver.rs
use crate::core::prelude::*;
use crate::i18n::cache::TranslationCache;
use crate::i18n::types::CaseRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const CACHE_SIZE: usize = 1000;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("Invalid placeholder pattern"));

/// Replaces `{name}` with the matching value. Unknown names stay as written,
/// and inserted values are never scanned again.
pub fn format_placeholders(template: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| (*v).to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Key lookup with an explicit `[active, default]` fallback chain.
pub struct Resolver {
    catalog: Arc<Catalog>,
    cache: TranslationCache,
}

impl Resolver {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cache: TranslationCache::new(CACHE_SIZE),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn default_language(&self) -> Language {
        self.catalog.default_language()
    }

    pub fn candidates(&self, active: Language) -> Vec<Language> {
        let default = self.catalog.default_language();
        if active == default {
            vec![active]
        } else {
            vec![active, default]
        }
    }

    /// Raw template, no placeholder substitution.
    pub fn lookup(&self, lang: Language, key: &str) -> Option<&str> {
        let translations = self.catalog.translations();
        self.candidates(lang)
            .into_iter()
            .find_map(|candidate| translations.get(candidate, key))
    }

    pub fn resolve(&mut self, lang: Language, key: &str) -> String {
        self.resolve_with(lang, key, &[])
    }

    pub fn resolve_with(&mut self, lang: Language, key: &str, params: &[(&str, &str)]) -> String {
        let cache_key = Self::build_cache_key(lang, key, params);
        if let Some(cached) = self.cache.get(&cache_key) {
            return cached;
        }

        let text = match self.lookup(lang, key) {
            Some(template) => format_placeholders(template, params),
            None => {
                log::debug!("Missing translation: {} ({})", key, lang);
                String::new()
            }
        };

        self.cache.insert(cache_key, text.clone());
        text
    }

    /// Same as [`Resolver::resolve`] for an unparsed code; unknown codes use the default.
    pub fn resolve_code(&mut self, code: &str, key: &str) -> String {
        let lang = code.parse().unwrap_or_else(|_| self.default_language());
        self.resolve(lang, key)
    }

    /// Record for the case in `lang`, or in the default language.
    pub fn case_record(&self, case_id: &str, lang: Language) -> Option<(Language, &CaseRecord)> {
        let cases = self.catalog.cases();
        self.candidates(lang)
            .into_iter()
            .find_map(|candidate| cases.get(case_id, candidate).map(|r| (candidate, r)))
    }

    /// Single case field, falling back field by field.
    pub fn case_field(&self, case_id: &str, lang: Language, field: &str) -> Option<&str> {
        let cases = self.catalog.cases();
        self.candidates(lang).into_iter().find_map(|candidate| {
            cases
                .get(case_id, candidate)
                .and_then(|record| record.field(field))
        })
    }

    pub fn cache_stats(&self) -> (usize, usize) {
        self.cache.stats()
    }

    fn build_cache_key(lang: Language, key: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            format!("{}:{}", lang, key)
        } else {
            let joined: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            format!("{}:{}:{}", lang, key, joined.join("\u{1f}"))
        }
    }
}
