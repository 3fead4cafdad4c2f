//! Key-value settings shared with the page panel.
//!
//! Settings live in a YAML file using the panel's storage key names
//! (`groqApiKey`, `openaiApiKey`, `selectedModel`, `selectedProvider`,
//! `codeGeneratorType`, `combinedDomSnippet`). Unknown keys are preserved so
//! a file written by a newer version round-trips.

mod model;
mod operations;
mod store;


pub use model::{SettingKey, Settings, SettingsChange};
pub use operations::default_settings_path;
pub use store::{FileSettingsStore, MemorySettingsStore, SettingsStore};

/// Environment variable overriding `groqApiKey`.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding `openaiApiKey`.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
