// =====================================================
// FILE: src/setup/setup_toml.rs - DEFAULT CONFIG + DISCOVERY
// =====================================================

use crate::core::constants::{CONFIG_DIR, CONFIG_FILE};
use crate::core::prelude::*;
use tokio::fs;

const DEFAULT_CONFIG: &str = r#"[general]
# error | warn | info | debug | trace (RUST_LOG takes precedence)
log_level = "info"

[language]
# Fallback language and completeness floor for every lookup
default = "vi"
# Optional directory with vi.json / en.json / cases.json overriding the embedded set
# dir = "translations"

[server]
host = "127.0.0.1"
port = 8080
workers = 1
# Directory holding index.html, case pages and assets
site_dir = "site"

[contact]
# Form relay receiving the contact form (form-encoded POST, JSON response)
endpoint = "https://formspree.io/f/your-form-id"
email = "contact@anhthuyet.design"

[storage]
# Persisted preferences (theme, accent, lang) used by the CLI
settings_file = ".folio/settings.toml"
"#;

pub async fn ensure_config_exists() -> Result<PathBuf> {
    let exe_path = std::env::current_exe()?;
    let base_dir = exe_path.parent().ok_or_else(|| {
        AppError::Config("Cannot determine executable directory".to_string())
    })?;

    let config_dir = base_dir.join(CONFIG_DIR);
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir).await?;
        log::debug!("Config directory created: {}", config_dir.display());
    }

    let config_path = config_dir.join(CONFIG_FILE);
    if !config_path.exists() {
        fs::write(&config_path, DEFAULT_CONFIG).await?;
        log::info!("Config file created: {}", config_path.display());
    }

    Ok(config_path)
}

pub fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(base_dir) = exe_path.parent() {
            paths.push(base_dir.join(CONFIG_DIR).join(CONFIG_FILE));
            paths.push(base_dir.join(CONFIG_FILE));
        }
    }
    paths.push(PathBuf::from(CONFIG_FILE));
    paths.push(PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.default_language, Language::Vi);
        assert_eq!(config.server.site_dir, PathBuf::from("site"));
        assert!(config.translations_dir.is_none());
    }
}
