// src/i18n/types.rs
use crate::i18n::error::TranslationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Supported languages. The set is closed: adding one means shipping its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Vi,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Vi, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::Vi => "Tiếng Việt",
            Language::En => "English",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = TranslationError;

    /// Accepts bare codes and region-tagged ones ("en-US", "vi_VN").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == primary)
            .ok_or_else(|| TranslationError::InvalidLanguage(s.trim().to_string()))
    }
}

/// language -> key -> localized text
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    languages: HashMap<Language, HashMap<String, String>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_language(&mut self, lang: Language, entries: HashMap<String, String>) {
        self.languages.insert(lang, entries);
    }

    pub fn insert(&mut self, lang: Language, key: impl Into<String>, text: impl Into<String>) {
        self.languages
            .entry(lang)
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn get(&self, lang: Language, key: &str) -> Option<&str> {
        self.languages
            .get(&lang)
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    pub fn has_language(&self, lang: Language) -> bool {
        self.languages.contains_key(&lang)
    }

    pub fn entries(&self, lang: Language) -> Option<&HashMap<String, String>> {
        self.languages.get(&lang)
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.keys().copied()
    }
}

/// Named text fields of one case study in one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseRecord {
    fields: BTreeMap<String, String>,
}

impl CaseRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.fields.insert(name.into(), text.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// case id -> language -> record
#[derive(Debug, Clone, Default)]
pub struct CaseStudyTable {
    cases: HashMap<String, HashMap<Language, CaseRecord>>,
}

impl CaseStudyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, case_id: impl Into<String>, lang: Language, record: CaseRecord) {
        self.cases
            .entry(case_id.into())
            .or_default()
            .insert(lang, record);
    }

    pub fn get(&self, case_id: &str, lang: Language) -> Option<&CaseRecord> {
        self.cases.get(case_id).and_then(|langs| langs.get(&lang))
    }

    pub fn contains(&self, case_id: &str) -> bool {
        self.cases.contains_key(case_id)
    }

    /// Builds the table from its JSON shape, skipping unsupported language codes.
    pub fn from_raw(raw: HashMap<String, HashMap<String, CaseRecord>>) -> Self {
        let mut table = Self::new();
        for (case_id, langs) in raw {
            for (code, record) in langs {
                match code.parse::<Language>() {
                    Ok(lang) => table.insert(case_id.clone(), lang, record),
                    Err(e) => log::warn!("Case '{}': {}", case_id, e),
                }
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_region_tagged_codes() {
        assert_eq!("en-US".parse::<Language>().unwrap(), Language::En);
        assert_eq!(" VI_vn ".parse::<Language>().unwrap(), Language::Vi);
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn case_table_skips_unknown_languages() {
        let raw: HashMap<String, HashMap<String, CaseRecord>> = serde_json::from_str(
            r#"{"sun": {"en": {"title": "Sun"}, "de": {"title": "Sonne"}}}"#,
        )
        .unwrap();
        let table = CaseStudyTable::from_raw(raw);
        assert_eq!(table.get("sun", Language::En).and_then(|r| r.title()), Some("Sun"));
        assert!(table.get("sun", Language::Vi).is_none());
    }
}
