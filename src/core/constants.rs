pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Preference keys, shared by every store backend
pub const STORAGE_KEY_THEME: &str = "theme";
pub const STORAGE_KEY_ACCENT: &str = "accent";
pub const STORAGE_KEY_LANG: &str = "lang";

pub const CONFIG_DIR: &str = ".folio";
pub const CONFIG_FILE: &str = "folio.toml";
