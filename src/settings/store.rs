//! Settings stores: where the controller reads and persists settings.

use super::model::Settings;
use crate::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Host-provided key-value storage.
pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// YAML file store with environment overrides applied on load.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(Settings::load(&self.path)?.with_env_overrides())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        // Never write environment-provided keys back to disk.
        let mut on_disk = Settings::load(&self.path)?;
        let keep_groq = on_disk.groq_api_key.take();
        let keep_openai = on_disk.openai_api_key.take();
        let mut to_write = settings.clone();
        if std::env::var_os(super::GROQ_API_KEY_ENV).is_some() {
            to_write.groq_api_key = keep_groq;
        }
        if std::env::var_os(super::OPENAI_API_KEY_ENV).is_some() {
            to_write.openai_api_key = keep_openai;
        }
        to_write.save(&self.path)
    }
}

/// In-memory store, used when no settings file should be touched.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }

    /// Snapshot of the stored settings.
    pub fn snapshot(&self) -> Settings {
        self.settings
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings> {
        Ok(self.snapshot())
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        *self
            .settings
            .lock()
            .unwrap_or_else(|poison| poison.into_inner()) = settings.clone();
        Ok(())
    }
}
