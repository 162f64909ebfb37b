// src/core/config.rs
use crate::core::constants::VERSION;
use crate::core::prelude::*;
use serde::Deserialize;

// TOML Configuration Structure
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfigToml,
    #[serde(default)]
    language: LanguageConfigToml,
    #[serde(default)]
    server: ServerConfigToml,
    #[serde(default)]
    contact: ContactConfigToml,
    #[serde(default)]
    storage: StorageConfigToml,
}

#[derive(Debug, Deserialize)]
struct GeneralConfigToml {
    #[serde(default = "default_log_level")]
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct LanguageConfigToml {
    #[serde(default = "default_language")]
    default: String,
    #[serde(default)]
    dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfigToml {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_workers")]
    workers: usize,
    #[serde(default = "default_site_dir")]
    site_dir: String,
}

#[derive(Debug, Deserialize)]
struct ContactConfigToml {
    #[serde(default = "default_endpoint")]
    endpoint: String,
    #[serde(default = "default_email")]
    email: String,
}

#[derive(Debug, Deserialize)]
struct StorageConfigToml {
    #[serde(default = "default_settings_file")]
    settings_file: String,
}

// Default Functions
fn default_log_level() -> String {
    "info".into()
}
fn default_language() -> String {
    crate::i18n::DEFAULT_LANGUAGE.code().into()
}
fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8080
}
fn default_workers() -> usize {
    1
}
fn default_site_dir() -> String {
    "site".into()
}
fn default_endpoint() -> String {
    "https://formspree.io/f/your-form-id".into()
}
fn default_email() -> String {
    "contact@anhthuyet.design".into()
}
fn default_settings_file() -> String {
    ".folio/settings.toml".into()
}

crate::impl_default!(GeneralConfigToml, GeneralConfigToml {
    log_level: default_log_level(),
});
crate::impl_default!(LanguageConfigToml, LanguageConfigToml {
    default: default_language(),
    dir: None,
});
crate::impl_default!(ServerConfigToml, ServerConfigToml {
    host: default_host(),
    port: default_port(),
    workers: default_workers(),
    site_dir: default_site_dir(),
});
crate::impl_default!(ContactConfigToml, ContactConfigToml {
    endpoint: default_endpoint(),
    email: default_email(),
});
crate::impl_default!(StorageConfigToml, StorageConfigToml {
    settings_file: default_settings_file(),
});

// Main Configuration Structures
#[derive(Debug, Clone)]
pub struct Config {
    config_path: Option<PathBuf>,
    pub log_level: String,
    pub default_language: Language,
    pub translations_dir: Option<PathBuf>,
    pub server: ServerConfig,
    pub contact: ContactConfig,
    pub settings_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub site_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub endpoint: String,
    pub email: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
            site_dir: PathBuf::from(default_site_dir()),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            email: default_email(),
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        Self::load_with_messages(true).await
    }

    pub async fn load_with_messages(show_messages: bool) -> Result<Self> {
        // Try existing configs
        for path in crate::setup::setup_toml::get_config_paths() {
            if path.exists() {
                match Self::from_file(&path).await {
                    Ok(config) => {
                        if show_messages {
                            Self::log_startup(&config);
                        }
                        return Ok(config);
                    }
                    Err(e) => log::warn!("Skipping config {}: {}", path.display(), e),
                }
            }
        }

        // Create new config
        let path = crate::setup::setup_toml::ensure_config_exists().await?;
        let config = Self::from_file(&path).await?;
        if show_messages {
            log::info!("New config: {}", path.display());
            Self::log_startup(&config);
        }
        Ok(config)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.as_ref().to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| AppError::Config(format!("TOML: {}", e)))?;

        let default_language = file.language.default.parse().unwrap_or_else(|_| {
            log::warn!(
                "Unsupported default language '{}', using {}",
                file.language.default,
                crate::i18n::DEFAULT_LANGUAGE
            );
            crate::i18n::DEFAULT_LANGUAGE
        });

        Ok(Self {
            config_path: None,
            log_level: file.general.log_level,
            default_language,
            translations_dir: file.language.dir.map(PathBuf::from),
            server: ServerConfig {
                host: file.server.host,
                port: file.server.port,
                workers: file.server.workers.max(1),
                site_dir: PathBuf::from(file.server.site_dir),
            },
            contact: ContactConfig {
                endpoint: file.contact.endpoint,
                email: file.contact.email,
            },
            settings_file: PathBuf::from(file.storage.settings_file),
        })
    }

    /// Resolves paths from the config relative to the config file's directory.
    pub fn resolve_path(&self, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            return relative.to_path_buf();
        }
        match self.config_path.as_ref().and_then(|p| p.parent()) {
            Some(base) if !base.as_os_str().is_empty() => base.join(relative),
            _ => relative.to_path_buf(),
        }
    }

    fn log_startup(config: &Config) {
        log::info!("Portfolio i18n v{}", VERSION);
        log::info!(
            "Server Config: {}:{}, workers: {}, site: {}",
            config.server.host,
            config.server.port,
            config.server.workers,
            config.server.site_dir.display()
        );
        log::debug!("Default language: {}", config.default_language);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: None,
            log_level: default_log_level(),
            default_language: crate::i18n::DEFAULT_LANGUAGE,
            translations_dir: None,
            server: ServerConfig::default(),
            contact: ContactConfig::default(),
            settings_file: PathBuf::from(default_settings_file()),
        }
    }
}
