// src/i18n/langs/mod.rs

use crate::i18n::error::TranslationError;
use crate::i18n::types::{CaseRecord, CaseStudyTable, Language, TranslationTable};
use rust_embed::RustEmbed;
use std::collections::HashMap;

#[derive(RustEmbed)]
#[folder = "src/i18n/langs/"]
pub struct Langs;

pub const CASES_FILE: &str = "cases.json";

pub fn language_file(lang: Language) -> String {
    format!("{}.json", lang.code())
}

/// Flat `{"key": "text"}` map for one language.
pub fn parse_language(data: &[u8]) -> Result<HashMap<String, String>, TranslationError> {
    let content =
        std::str::from_utf8(data).map_err(|e| TranslationError::LoadError(e.to_string()))?;
    serde_json::from_str(content).map_err(|e| TranslationError::LoadError(e.to_string()))
}

/// `{"case": {"lang": {"field": "text"}}}`
pub fn parse_cases(data: &[u8]) -> Result<CaseStudyTable, TranslationError> {
    let raw: HashMap<String, HashMap<String, CaseRecord>> =
        serde_json::from_slice(data).map_err(|e| TranslationError::LoadError(e.to_string()))?;
    Ok(CaseStudyTable::from_raw(raw))
}

pub fn embedded_translations() -> Result<TranslationTable, TranslationError> {
    let mut table = TranslationTable::new();
    for lang in Language::ALL {
        let filename = language_file(lang);
        match Langs::get(&filename) {
            Some(file) => table.insert_language(lang, parse_language(file.data.as_ref())?),
            None => log::warn!("No embedded translations for {}", lang),
        }
    }
    Ok(table)
}

pub fn embedded_cases() -> Result<CaseStudyTable, TranslationError> {
    let file = Langs::get(CASES_FILE)
        .ok_or_else(|| TranslationError::LoadError(format!("File not found: {}", CASES_FILE)))?;
    parse_cases(file.data.as_ref())
}
