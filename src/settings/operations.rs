//! Settings loading, validation and change application.

use super::model::{SettingKey, Settings, SettingsChange};
use super::{GROQ_API_KEY_ENV, OPENAI_API_KEY_ENV};
use crate::error::{DomscribeError, Result};
use crate::fs::atomic_write_file;
use crate::prompt::TemplateKey;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `settings.yaml` under the platform config directory, e.g.
/// `$XDG_CONFIG_HOME/domscribe/settings.yaml` on Linux.
pub fn default_settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        DomscribeError::UserError(
            "could not determine the configuration directory; pass --settings PATH".to_string(),
        )
    })?;
    Ok(config_dir.join("domscribe").join("settings.yaml"))
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read
    /// or parsed is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomscribeError::UserError(format!(
                "failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(yaml)
            .map_err(|e| DomscribeError::UserError(format!("failed to parse settings YAML: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DomscribeError::UserError(format!("failed to serialize settings: {}", e)))
    }

    /// Write settings atomically.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        atomic_write_file(path, &self.to_yaml()?)
    }

    /// Validate setting values.
    ///
    /// - `selectedProvider` must be empty, `groq` or `openai`
    /// - `codeGeneratorType`, when set, must name a known generator
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.selected_provider.as_str(), "" | "groq" | "openai") {
            return Err(DomscribeError::UserError(format!(
                "settings validation failed: selectedProvider must be 'groq' or 'openai' (found '{}')",
                self.selected_provider
            )));
        }

        if let Some(ref key) = self.code_generator_type
            && key.parse::<TemplateKey>().is_err()
        {
            return Err(DomscribeError::UserError(format!(
                "settings validation failed: codeGeneratorType '{}' is not a known generator",
                key
            )));
        }

        Ok(())
    }

    /// Apply `GROQ_API_KEY` / `OPENAI_API_KEY` from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        for (var, key) in [
            (GROQ_API_KEY_ENV, SettingKey::GroqApiKey),
            (OPENAI_API_KEY_ENV, SettingKey::OpenaiApiKey),
        ] {
            if let Ok(value) = env::var(var)
                && !value.is_empty()
            {
                debug!(setting = %key, "using API key from environment");
                self.apply_change(&SettingsChange::new(key, Some(value)));
            }
        }
        self
    }

    /// Current value of a setting.
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        match key {
            SettingKey::GroqApiKey => self.groq_api_key.as_deref(),
            SettingKey::OpenaiApiKey => self.openai_api_key.as_deref(),
            SettingKey::SelectedModel => non_empty(&self.selected_model),
            SettingKey::SelectedProvider => non_empty(&self.selected_provider),
            SettingKey::CodeGeneratorType => self.code_generator_type.as_deref(),
            SettingKey::CombinedDomSnippet => self.combined_dom_snippet.as_deref(),
        }
    }

    /// Apply a change notification without validation.
    pub fn apply_change(&mut self, change: &SettingsChange) {
        let value = change.new_value.clone();
        match change.key {
            SettingKey::GroqApiKey => self.groq_api_key = value,
            SettingKey::OpenaiApiKey => self.openai_api_key = value,
            SettingKey::SelectedModel => self.selected_model = value.unwrap_or_default(),
            SettingKey::SelectedProvider => self.selected_provider = value.unwrap_or_default(),
            SettingKey::CodeGeneratorType => self.code_generator_type = value,
            SettingKey::CombinedDomSnippet => self.combined_dom_snippet = value,
        }
    }

    /// Set a setting by its storage name, validating the result.
    ///
    /// An empty value removes the setting.
    pub fn set(&mut self, name: &str, value: &str) -> Result<SettingsChange> {
        let key: SettingKey = name.parse()?;
        let new_value = (!value.is_empty()).then(|| value.to_string());
        let change = SettingsChange::new(key, new_value);

        let mut candidate = self.clone();
        candidate.apply_change(&change);
        candidate.validate()?;

        *self = candidate;
        Ok(change)
    }

    /// Display value for a setting, masking credentials.
    pub fn display_value(&self, key: SettingKey) -> String {
        match self.get(key) {
            None => "(unset)".to_string(),
            Some(v) if key.is_secret() => mask_secret(v),
            Some(v) if key == SettingKey::CombinedDomSnippet => {
                format!("({} chars)", v.chars().count())
            }
            Some(v) => v.to_string(),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

/// Keep the last four characters of a secret.
fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
