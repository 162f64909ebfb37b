// src/i18n/mod.rs
pub mod cache;
pub mod catalog;
pub mod error;
pub mod langs;
pub mod resolver;
pub mod types;

pub use catalog::Catalog;
pub use error::TranslationError;
pub use resolver::{format_placeholders, Resolver};
pub use types::{CaseRecord, CaseStudyTable, Language, TranslationTable};

pub const DEFAULT_LANGUAGE: Language = Language::Vi;

pub fn available_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

/// `t!(resolver, lang, "key")` or `t!(resolver, lang, "key", name = value, ...)`
#[macro_export]
macro_rules! t {
    ($resolver:expr, $lang:expr, $key:expr) => {
        $resolver.resolve($lang, $key)
    };
    ($resolver:expr, $lang:expr, $key:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $resolver.resolve_with(
            $lang,
            $key,
            &[$((stringify!($name), ::std::convert::AsRef::<str>::as_ref(&$value))),+],
        )
    };
}
