//! Implementation of the `domscribe generate` command.
//!
//! Plays the side panel against a [`StaticPage`]: the snippet is "inspected",
//! the dropdown selection is applied, and the send flow runs once.

use crate::cli::GenerateArgs;
use domscribe::controller::{ChatController, PanelEvent};
use domscribe::error::{DomscribeError, Result};
use domscribe::fs::{atomic_write_file, read_to_string};
use domscribe::page::StaticPage;
use domscribe::provider::{ClientFactory, HttpClientFactory};
use domscribe::selection::{GenerationMode, Selection};
use domscribe::settings::{FileSettingsStore, Settings, SettingsStore};
use domscribe::transcript::{Role, Transcript};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Title of exported HTML transcripts.
const HTML_TITLE: &str = "domscribe transcript";

/// Execute the `domscribe generate` command.
pub fn cmd_generate(args: GenerateArgs, settings_path: &Path) -> Result<()> {
    let snippet = read_snippet(args.dom.as_deref())?;
    let store = FileSettingsStore::new(settings_path);
    let output = run(&args, snippet, &store, &HttpClientFactory)?;
    println!("{}", output);
    Ok(())
}

/// Run one generation and return what should be printed: the rendered
/// prompt for `--dry-run`, else the assistant reply.
pub fn run(
    args: &GenerateArgs,
    snippet: Option<String>,
    store: &dyn SettingsStore,
    factory: &dyn ClientFactory,
) -> Result<String> {
    let mode = args
        .mode
        .as_deref()
        .map(|m| m.parse::<GenerationMode>())
        .transpose()?;
    let selection = Selection::new(args.language.parse()?, args.engine.parse()?, mode);

    let has_snippet = snippet.is_some();
    let page = StaticPage::new(args.url.clone().unwrap_or_default(), snippet);

    let mut controller = ChatController::new(&page, store, factory)?;
    controller.handle(PanelEvent::SelectionChanged(selection))?;
    controller.handle(PanelEvent::UserActionChanged(args.action.clone()))?;

    // Per-run overrides go through the same validation as `settings set`
    // but are never persisted.
    let mut overrides = Settings::default();
    if let Some(ref provider) = args.provider {
        let change = overrides.set("selectedProvider", provider)?;
        controller.handle(PanelEvent::SettingsChanged(change))?;
    }
    if let Some(ref model) = args.model {
        let change = overrides.set("selectedModel", model)?;
        controller.handle(PanelEvent::SettingsChanged(change))?;
    }

    if has_snippet {
        controller.handle(PanelEvent::InspectClicked)?;
    }

    if args.dry_run {
        let prepared = controller.prepare_prompt()?;
        info!(template = %prepared.key, "dry run, not calling the API");
        return Ok(prepared.text);
    }

    let result = controller.handle(PanelEvent::SendClicked);
    export(args, controller.transcript())?;
    result?;

    Ok(controller
        .transcript()
        .last()
        .filter(|entry| entry.role == Role::Assistant)
        .map(|entry| entry.content.clone())
        .unwrap_or_default())
}

/// Write the requested transcript exports.
fn export(args: &GenerateArgs, transcript: &Transcript) -> Result<()> {
    if let Some(ref path) = args.transcript {
        atomic_write_file(path, &transcript.to_ndjson()?)?;
        info!(path = %path.display(), "wrote transcript");
    }
    if let Some(ref path) = args.html {
        atomic_write_file(path, &transcript.to_html(HTML_TITLE))?;
        info!(path = %path.display(), "wrote HTML transcript");
    }
    Ok(())
}

/// Read the snippet from a file or stdin (`-`). Blank input counts as none.
fn read_snippet(source: Option<&str>) -> Result<Option<String>> {
    let text = match source {
        None => return Ok(None),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).map_err(|e| {
                DomscribeError::UserError(format!("failed to read DOM from stdin: {}", e))
            })?;
            buf
        }
        Some(path) => read_to_string(path)?,
    };
    Ok((!text.trim().is_empty()).then_some(text))
}
