//! CLI argument parsing for domscribe.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// domscribe: generate page objects, tests and feature files from DOM
/// snippets with a hosted chat model.
///
/// The snippet plays the part of an inspected page region; the selected
/// language, engine and mode pick one of the built-in prompts.
#[derive(Parser, Debug)]
#[command(name = "domscribe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (defaults to domscribe/settings.yaml in the platform config directory).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings_path: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug). DOMSCRIBE_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for domscribe.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate code for a DOM snippet.
    ///
    /// Inspects the snippet, renders the prompt for the selected generator
    /// and prints the model's reply.
    Generate(GenerateArgs),

    /// Print the generator key for a language, engine and mode.
    Resolve(ResolveArgs),

    /// Inspect and render the built-in prompt templates.
    Templates(TemplatesCommand),

    /// Show or change stored settings.
    Settings(SettingsCommand),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// File holding the captured DOM snippet, or `-` for stdin.
    ///
    /// Without it the cached `combinedDomSnippet` setting is used.
    #[arg(long, value_name = "FILE")]
    pub dom: Option<String>,

    /// URL of the page the snippet was captured from.
    #[arg(long)]
    pub url: Option<String>,

    /// Language binding (java, typescript, ...).
    #[arg(short, long, default_value = "java")]
    pub language: String,

    /// Browser engine (selenium, playwright, ...).
    #[arg(short, long, default_value = "selenium")]
    pub engine: String,

    /// Generation mode for Selenium Java: page or test.
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Provider for this run only (groq or openai).
    #[arg(long)]
    pub provider: Option<String>,

    /// Model for this run only.
    #[arg(long)]
    pub model: Option<String>,

    /// Action under test, used by the Cucumber prompt.
    #[arg(short, long)]
    pub action: Option<String>,

    /// Write the transcript as an HTML page.
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Write the transcript as NDJSON.
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<PathBuf>,

    /// Print the rendered prompt instead of calling the API.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Language binding.
    #[arg(short, long)]
    pub language: String,

    /// Browser engine.
    #[arg(short, long)]
    pub engine: String,

    /// Generation mode (page or test).
    #[arg(short, long)]
    pub mode: Option<String>,
}

/// Template subcommands.
#[derive(Parser, Debug)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub action: TemplatesAction,
}

/// Available template actions.
#[derive(Subcommand, Debug)]
pub enum TemplatesAction {
    /// List template keys with their display names.
    List,

    /// Print a template body with placeholders intact.
    Show(TemplateShowArgs),

    /// Render a template with the given variables.
    Render(TemplateRenderArgs),
}

/// Arguments for `templates show`.
#[derive(Parser, Debug)]
pub struct TemplateShowArgs {
    /// Template key (e.g., CUCUMBER_ONLY).
    pub key: String,
}

/// Arguments for `templates render`.
#[derive(Parser, Debug)]
pub struct TemplateRenderArgs {
    /// Template key (e.g., CUCUMBER_ONLY).
    pub key: String,

    /// Variable as name=value. Repeatable; order is substitution order.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    pub vars: Vec<String>,
}

/// Settings subcommands.
#[derive(Parser, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Available settings actions.
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print every setting. API keys are masked.
    Show,

    /// Set a setting. An empty value removes it.
    Set(SettingsSetArgs),

    /// Print the settings file path.
    Path,
}

/// Arguments for `settings set`.
#[derive(Parser, Debug)]
pub struct SettingsSetArgs {
    /// Setting name (e.g., selectedProvider).
    pub key: String,

    /// New value.
    pub value: String,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_generate_defaults() {
        let cli = Cli::try_parse_from(["domscribe", "generate"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.settings_path.is_none());
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.language, "java");
            assert_eq!(args.engine, "selenium");
            assert!(args.mode.is_none());
            assert!(args.dom.is_none());
            assert!(!args.dry_run);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_generate_full() {
        let cli = Cli::try_parse_from([
            "domscribe",
            "-vv",
            "generate",
            "--dom",
            "-",
            "--url",
            "https://example.com",
            "--language",
            "java",
            "--engine",
            "playwright",
            "--mode",
            "page",
            "--provider",
            "groq",
            "--model",
            "llama-3.1-8b-instant",
            "--action",
            "log in",
            "--html",
            "out.html",
            "--transcript",
            "out.ndjson",
            "--dry-run",
            "--settings",
            "/tmp/s.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.settings_path, Some(PathBuf::from("/tmp/s.yaml")));
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.dom.as_deref(), Some("-"));
            assert_eq!(args.engine, "playwright");
            assert_eq!(args.mode.as_deref(), Some("page"));
            assert_eq!(args.provider.as_deref(), Some("groq"));
            assert_eq!(args.action.as_deref(), Some("log in"));
            assert_eq!(args.html, Some(PathBuf::from("out.html")));
            assert!(args.dry_run);
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn parse_resolve_requires_language_and_engine() {
        assert!(Cli::try_parse_from(["domscribe", "resolve", "--language", "java"]).is_err());
        let cli = Cli::try_parse_from([
            "domscribe", "resolve", "-l", "java", "-e", "selenium", "-m", "PAGE",
        ])
        .unwrap();
        if let Command::Resolve(args) = cli.command {
            assert_eq!(args.mode.as_deref(), Some("PAGE"));
        } else {
            panic!("Expected Resolve command");
        }
    }

    #[test]
    fn parse_templates_render_vars_in_order() {
        let cli = Cli::try_parse_from([
            "domscribe",
            "templates",
            "render",
            "CUCUMBER_ONLY",
            "--var",
            "domContent=<input/>",
            "--var",
            "pageUrl=http://x",
        ])
        .unwrap();
        if let Command::Templates(TemplatesCommand {
            action: TemplatesAction::Render(args),
        }) = cli.command
        {
            assert_eq!(args.key, "CUCUMBER_ONLY");
            assert_eq!(args.vars, vec!["domContent=<input/>", "pageUrl=http://x"]);
        } else {
            panic!("Expected templates render");
        }
    }

    #[test]
    fn parse_settings_set() {
        let cli =
            Cli::try_parse_from(["domscribe", "settings", "set", "selectedProvider", "groq"])
                .unwrap();
        if let Command::Settings(SettingsCommand {
            action: SettingsAction::Set(args),
        }) = cli.command
        {
            assert_eq!(args.key, "selectedProvider");
            assert_eq!(args.value, "groq");
        } else {
            panic!("Expected settings set");
        }
    }

    #[test]
    fn parse_settings_set_empty_value() {
        let cli = Cli::try_parse_from(["domscribe", "settings", "set", "groqApiKey", ""]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Settings(SettingsCommand {
                action: SettingsAction::Set(_)
            })
        ));
    }
}
