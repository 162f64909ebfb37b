// lang/context.rs - EXPLICIT LANGUAGE CONTEXT

use super::persistence::PreferenceStore;
use crate::core::constants::STORAGE_KEY_LANG;
use crate::core::prelude::*;
use crate::i18n::Resolver;

/// The active language plus everything needed to resolve and persist it.
/// One instance per document/visitor; nothing here is global.
pub struct LanguageContext<S: PreferenceStore> {
    active: Language,
    resolver: Resolver,
    store: S,
}

impl<S: PreferenceStore> LanguageContext<S> {
    /// Restores the persisted `lang` preference, else the catalog default.
    pub fn restore(catalog: Arc<Catalog>, store: S) -> Self {
        let default = catalog.default_language();
        let active = match store.get(STORAGE_KEY_LANG) {
            Some(code) => code.parse().unwrap_or_else(|e| {
                log::debug!("Ignoring stored language: {}", e);
                default
            }),
            None => default,
        };
        Self::with_language(catalog, store, active)
    }

    pub fn with_language(catalog: Arc<Catalog>, store: S, active: Language) -> Self {
        Self {
            active,
            resolver: Resolver::new(catalog),
            store,
        }
    }

    pub fn active(&self) -> Language {
        self.active
    }

    /// Explicit user selection; the only way the active language changes.
    pub fn select(&mut self, lang: Language) {
        if lang != self.active {
            log::debug!("Language changed: {} -> {}", self.active, lang);
        }
        self.active = lang;
    }

    pub fn select_code(&mut self, code: &str) -> Result<Language> {
        let lang: Language = code.parse()?;
        self.select(lang);
        Ok(lang)
    }

    pub fn persist(&mut self) {
        self.store.set(STORAGE_KEY_LANG, self.active.code());
    }

    pub fn resolver(&mut self) -> &mut Resolver {
        &mut self.resolver
    }

    pub fn resolve(&mut self, key: &str) -> String {
        self.resolver.resolve(self.active, key)
    }

    pub fn resolve_with(&mut self, key: &str, params: &[(&str, &str)]) -> String {
        self.resolver.resolve_with(self.active, key, params)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
