//! Command implementations for domscribe.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod generate;
mod resolve;
mod settings_cmd;
mod templates;

use crate::cli::{Cli, Command, SettingsAction, TemplatesAction};
use domscribe::error::Result;
use domscribe::settings::default_settings_path;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let settings_path = match cli.settings_path {
        Some(path) => path,
        None => default_settings_path()?,
    };

    match cli.command {
        Command::Generate(args) => generate::cmd_generate(args, &settings_path),
        Command::Resolve(args) => resolve::cmd_resolve(args),
        Command::Templates(cmd) => match cmd.action {
            TemplatesAction::List => templates::cmd_list(),
            TemplatesAction::Show(args) => templates::cmd_show(args),
            TemplatesAction::Render(args) => templates::cmd_render(args),
        },
        Command::Settings(cmd) => match cmd.action {
            SettingsAction::Show => settings_cmd::cmd_show(&settings_path),
            SettingsAction::Set(args) => settings_cmd::cmd_set(args, &settings_path),
            SettingsAction::Path => {
                println!("{}", settings_path.display());
                Ok(())
            }
        },
    }
}
