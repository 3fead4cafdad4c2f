//! Implementation of the `domscribe settings` subcommands.

use crate::cli::SettingsSetArgs;
use domscribe::error::Result;
use domscribe::settings::{FileSettingsStore, SettingKey, Settings, SettingsStore};
use std::path::Path;

/// Execute `domscribe settings show`.
///
/// Shows the effective values, including API keys from the environment.
pub fn cmd_show(path: &Path) -> Result<()> {
    let settings = FileSettingsStore::new(path).load()?;
    print!("{}", show(&settings));
    Ok(())
}

/// Execute `domscribe settings set`.
pub fn cmd_set(args: SettingsSetArgs, path: &Path) -> Result<()> {
    let settings = set(path, &args.key, &args.value)?;
    let key: SettingKey = args.key.parse()?;
    println!("{} = {}", key, settings.display_value(key));
    Ok(())
}

fn show(settings: &Settings) -> String {
    SettingKey::ALL
        .iter()
        .map(|key| format!("{:<20} {}\n", key.as_str(), settings.display_value(*key)))
        .collect()
}

/// Update one setting in the file at `path`. Environment overrides are not
/// applied, so they are never written to disk.
fn set(path: &Path, key: &str, value: &str) -> Result<Settings> {
    let mut settings = Settings::load(path)?;
    let change = settings.set(key, value)?;
    settings.save(path)?;
    tracing::info!(setting = %change.key, path = %path.display(), "setting updated");
    Ok(settings)
}
