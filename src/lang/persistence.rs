// lang/persistence.rs - KEY/VALUE PREFERENCES (theme, accent, lang)

use crate::core::prelude::*;
use std::collections::BTreeMap;

/// String key/value preferences surviving between visits.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &mut T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    dirty: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// True once a `set` changed a value.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.values.get(key).map(String::as_str) != Some(value) {
            self.values.insert(key.to_string(), value.to_string());
            self.dirty = true;
        }
    }
}

/// Preferences kept in a flat TOML file, for the CLI.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    store: MemoryStore,
}

impl SettingsFile {
    /// A missing file yields empty preferences.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let store = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let values: BTreeMap<String, String> = toml::from_str(&content).map_err(|e| {
                    AppError::Config(format!("{}: {}", path.display(), e))
                })?;
                MemoryStore {
                    values,
                    dirty: false,
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings at {}, starting empty", path.display());
                MemoryStore::new()
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        Ok(Self { path, store })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        self.store.values()
    }

    /// Writes only when something changed since load or the last save.
    pub async fn save(&mut self) -> Result<()> {
        if !self.store.is_dirty() {
            return Ok(());
        }
        let content = toml::to_string(self.store.values())
            .map_err(|e| AppError::Config(format!("TOML: {}", e)))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, content).await?;
        self.store.mark_clean();
        log::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

impl PreferenceStore for SettingsFile {
    fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.store.set(key, value)
    }
}
