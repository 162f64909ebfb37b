// src/i18n/catalog.rs
use crate::core::prelude::*;
use crate::i18n::langs;
use crate::i18n::types::{CaseStudyTable, TranslationTable};
use std::collections::BTreeMap;

/// Immutable translation + case-study data, shared between renders.
#[derive(Debug, Clone)]
pub struct Catalog {
    translations: TranslationTable,
    cases: CaseStudyTable,
    default_language: Language,
}

impl Catalog {
    pub fn new(
        translations: TranslationTable,
        cases: CaseStudyTable,
        default_language: Language,
    ) -> Self {
        if !translations.has_language(default_language) {
            log::warn!(
                "Default language {} has no table; every lookup will be empty",
                default_language
            );
        }
        Self {
            translations,
            cases,
            default_language,
        }
    }

    pub fn embedded() -> Result<Self> {
        Self::embedded_with_default(crate::i18n::DEFAULT_LANGUAGE)
    }

    pub fn embedded_with_default(default_language: Language) -> Result<Self> {
        Ok(Self::new(
            langs::embedded_translations()?,
            langs::embedded_cases()?,
            default_language,
        ))
    }

    /// Loads `<code>.json` files and `cases.json` from a directory.
    /// Only the default language's file is mandatory.
    pub async fn from_dir(dir: &Path, default_language: Language) -> Result<Self> {
        let mut translations = TranslationTable::new();

        for lang in Language::ALL {
            let path = dir.join(langs::language_file(lang));
            match tokio::fs::read(&path).await {
                Ok(data) => translations.insert_language(lang, langs::parse_language(&data)?),
                Err(e) if lang == default_language => {
                    return Err(AppError::Translation(TranslationError::LoadError(format!(
                        "{}: {}",
                        path.display(),
                        e
                    ))));
                }
                Err(_) => log::debug!("No translations for {} in {}", lang, dir.display()),
            }
        }

        let cases_path = dir.join(langs::CASES_FILE);
        let cases = match tokio::fs::read(&cases_path).await {
            Ok(data) => langs::parse_cases(&data)?,
            Err(_) => {
                log::debug!("No {} in {}", langs::CASES_FILE, dir.display());
                CaseStudyTable::new()
            }
        };

        Ok(Self::new(translations, cases, default_language))
    }

    /// Embedded set unless the config points at an override directory.
    pub async fn load(config: &Config) -> Result<Self> {
        match &config.translations_dir {
            Some(dir) => {
                let dir = config.resolve_path(dir);
                log::info!("Loading translations from {}", dir.display());
                Self::from_dir(&dir, config.default_language).await
            }
            None => Self::embedded_with_default(config.default_language),
        }
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    pub fn translations(&self) -> &TranslationTable {
        &self.translations
    }

    pub fn cases(&self) -> &CaseStudyTable {
        &self.cases
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.translations.get(self.default_language, key).is_some()
    }

    /// Every key of the default table, resolved for `lang` with fallback applied.
    pub fn complete_table(&self, lang: Language) -> BTreeMap<String, String> {
        let mut table: BTreeMap<String, String> = self
            .translations
            .entries(self.default_language)
            .map(|entries| entries.clone().into_iter().collect())
            .unwrap_or_default();

        if lang != self.default_language {
            if let Some(entries) = self.translations.entries(lang) {
                table.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        table
    }

    /// Keys of the default table that `lang` does not translate.
    pub fn missing_in(&self, lang: Language) -> Vec<String> {
        let Some(defaults) = self.translations.entries(self.default_language) else {
            return Vec::new();
        };
        let mut missing: Vec<String> = defaults
            .keys()
            .filter(|key| self.translations.get(lang, key).is_none())
            .cloned()
            .collect();
        missing.sort();
        missing
    }
}
