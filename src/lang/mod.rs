// lang/mod.rs - ACTIVE LANGUAGE + PREFERENCE PERSISTENCE

pub mod context;
pub mod persistence;

pub use context::LanguageContext;
pub use persistence::{MemoryStore, PreferenceStore, SettingsFile};
