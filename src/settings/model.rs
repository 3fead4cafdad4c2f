//! Settings struct and setting keys.

use crate::error::{DomscribeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Persisted panel settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Groq API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,

    /// OpenAI API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Model identifier passed to the chat API. Empty means provider default.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub selected_model: String,

    /// `groq` or `openai`. Anything else uses OpenAI.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub selected_provider: String,

    /// Last resolved generator key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_generator_type: Option<String>,

    /// Snippet cached by the page when the panel was closed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_dom_snippet: Option<String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// A known settings key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    GroqApiKey,
    OpenaiApiKey,
    SelectedModel,
    SelectedProvider,
    CodeGeneratorType,
    CombinedDomSnippet,
}

impl SettingKey {
    pub const ALL: [SettingKey; 6] = [
        SettingKey::GroqApiKey,
        SettingKey::OpenaiApiKey,
        SettingKey::SelectedModel,
        SettingKey::SelectedProvider,
        SettingKey::CodeGeneratorType,
        SettingKey::CombinedDomSnippet,
    ];

    /// Storage name, e.g. `groqApiKey`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::GroqApiKey => "groqApiKey",
            SettingKey::OpenaiApiKey => "openaiApiKey",
            SettingKey::SelectedModel => "selectedModel",
            SettingKey::SelectedProvider => "selectedProvider",
            SettingKey::CodeGeneratorType => "codeGeneratorType",
            SettingKey::CombinedDomSnippet => "combinedDomSnippet",
        }
    }

    /// Whether the value is a credential and must be masked on display.
    pub fn is_secret(&self) -> bool {
        matches!(self, SettingKey::GroqApiKey | SettingKey::OpenaiApiKey)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = DomscribeError;

    fn from_str(s: &str) -> Result<Self> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = SettingKey::ALL.iter().map(|k| k.as_str()).collect();
                DomscribeError::UserError(format!(
                    "unknown setting '{}'. Known settings: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// A single storage change notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChange {
    pub key: SettingKey,
    /// `None` when the key was removed.
    pub new_value: Option<String>,
}

impl SettingsChange {
    pub fn new(key: SettingKey, new_value: Option<String>) -> Self {
        Self { key, new_value }
    }
}
