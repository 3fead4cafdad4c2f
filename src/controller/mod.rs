//! The chat controller: panel events in, prompts out, replies into the
//! transcript.
//!
//! The controller mediates between the page ([`PageChannel`]), the chat
//! providers ([`ChatClient`]) and the [`Transcript`]. All state lives in one
//! [`PanelState`] owned by the controller and is only touched from
//! [`ChatController::handle`].
//!
//! # Flows
//!
//! - **Inspect**: inject the observer into the active tab, post
//!   `TOGGLE_INSPECTOR`, flip Idle/Inspecting. Restricted pages abort and
//!   stay Idle.
//! - **Send**: check credentials and selection, resolve the generator,
//!   render the prompt, call the provider, append the reply, clear the
//!   selection and tell the page to drop its highlight.
//! - **Reset**: clear the transcript and selection, ask the page to clean
//!   up and re-inject the observer.
//!
//! Failures are appended to the transcript as system entries and also
//! returned so a front end can react (for example with an exit code).

mod state;


pub use state::{InspectorState, PanelState};

use crate::error::{DomscribeError, Result};
use crate::extract::extract_text;
use crate::page::{PageChannel, PageMessage, Tab, ensure_observer};
use crate::prompt::{
    TemplateKey, TemplateStore, VAR_DOM_CONTENT, VAR_JAVA_MODE, VAR_PAGE_URL, VAR_USER_ACTION,
    Variables,
};
use crate::provider::{ChatClient, ClientFactory, Provider};
use crate::selection::Selection;
use crate::settings::{SettingKey, Settings, SettingsChange, SettingsStore};
use crate::transcript::{Role, Transcript};
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// System message shown when the panel opens or is reset.
pub const INITIAL_SYSTEM_MESSAGE: &str = "";

/// Shown when the inspector could not be started.
pub const INSPECTOR_FAILED_MESSAGE: &str =
    "Failed to activate inspector. Please refresh and try again.";

/// Shown when a reset could not reach the page.
pub const RESET_FAILED_MESSAGE: &str = "Error resetting chat. Please close and reopen.";

/// Page URL used when there is no active tab.
pub const UNKNOWN_PAGE_URL: &str = "unknown";

/// Events the panel reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    InspectClicked,
    SendClicked,
    ResetClicked,
    /// A message arrived from the page.
    Page(PageMessage),
    /// The settings store reported a change.
    SettingsChanged(SettingsChange),
    /// Language, engine or mode changed.
    SelectionChanged(Selection),
    /// The user described the action under test.
    UserActionChanged(Option<String>),
}

/// A rendered prompt together with where it came from.
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub key: TemplateKey,
    pub text: String,
    /// Active tab at render time, if any.
    pub tab: Option<Tab>,
}

/// Controller for one panel instance.
pub struct ChatController<'a> {
    state: PanelState,
    transcript: Transcript,
    settings: Settings,
    clients: HashMap<Provider, Box<dyn ChatClient>>,
    templates: TemplateStore,
    page: &'a dyn PageChannel,
    store: &'a dyn SettingsStore,
    factory: &'a dyn ClientFactory,
}

impl<'a> ChatController<'a> {
    /// Create a controller, loading settings and building clients for every
    /// provider that has an API key.
    pub fn new(
        page: &'a dyn PageChannel,
        store: &'a dyn SettingsStore,
        factory: &'a dyn ClientFactory,
    ) -> Result<Self> {
        let settings = store.load()?;

        let mut controller = Self {
            state: PanelState::default(),
            transcript: Transcript::new(),
            settings: Settings::default(),
            clients: HashMap::new(),
            templates: TemplateStore::builtin(),
            page,
            store,
            factory,
        };
        controller.transcript.push(Role::System, INITIAL_SYSTEM_MESSAGE);

        for key in [SettingKey::GroqApiKey, SettingKey::OpenaiApiKey] {
            let value = settings.get(key).map(str::to_string);
            controller.on_settings_changed(SettingsChange::new(key, value));
        }
        controller.state.selected_model = settings.selected_model.clone();
        controller.state.selected_provider = settings.selected_provider.clone();
        if let Some(key) = settings
            .code_generator_type
            .as_deref()
            .and_then(|k| k.parse::<TemplateKey>().ok())
        {
            controller.state.code_generator_type = key;
        }
        controller.settings = settings;

        Ok(controller)
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether a client is configured for `provider`.
    pub fn has_client(&self, provider: Provider) -> bool {
        self.clients.contains_key(&provider)
    }

    /// Dispatch one event, then deliver any messages the page sent meanwhile.
    pub fn handle(&mut self, event: PanelEvent) -> Result<()> {
        debug!(?event, "panel event");
        let result = match event {
            PanelEvent::InspectClicked => self.on_inspect_clicked(),
            PanelEvent::SendClicked => self.on_send_clicked(),
            PanelEvent::ResetClicked => self.on_reset_clicked(),
            PanelEvent::Page(message) => {
                self.on_page_message(message);
                Ok(())
            }
            PanelEvent::SettingsChanged(change) => {
                self.on_settings_changed(change);
                Ok(())
            }
            PanelEvent::SelectionChanged(selection) => {
                self.on_selection_changed(selection);
                Ok(())
            }
            PanelEvent::UserActionChanged(action) => {
                self.state.user_action = action.filter(|a| !a.trim().is_empty());
                Ok(())
            }
        };
        self.pump_page_messages();
        result
    }

    /// Deliver queued page messages.
    pub fn pump_page_messages(&mut self) {
        for message in self.page.drain_incoming() {
            self.on_page_message(message);
        }
    }

    // ------------------------------------------------------------------
    // Inspect
    // ------------------------------------------------------------------

    fn on_inspect_clicked(&mut self) -> Result<()> {
        let tab = match self.page.active_tab() {
            Ok(Some(tab)) => tab,
            Ok(None) => {
                debug!("no active tab, ignoring inspect");
                return Ok(());
            }
            Err(e) => return Err(self.inspector_failed(e)),
        };

        if tab.is_restricted() {
            info!(url = %tab.url, "Cannot use inspector on this page");
            return Err(DomscribeError::InjectionFailure(format!(
                "cannot use inspector on {}",
                tab.url
            )));
        }

        if let Err(e) = ensure_observer(self.page, &tab) {
            return Err(self.inspector_failed(e));
        }
        self.page
            .post(&tab, PageMessage::ToggleInspector { reset: true });

        self.state.inspector = self.state.inspector.toggled();
        info!(state = ?self.state.inspector, url = %tab.url, "inspector toggled");
        Ok(())
    }

    fn inspector_failed(&mut self, e: DomscribeError) -> DomscribeError {
        error!(error = %e, "Inspector error");
        self.transcript.push(Role::System, INSPECTOR_FAILED_MESSAGE);
        self.state.inspector = InspectorState::Idle;
        match e {
            DomscribeError::InjectionFailure(_) => e,
            other => DomscribeError::InjectionFailure(other.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Page messages
    // ------------------------------------------------------------------

    fn on_page_message(&mut self, message: PageMessage) {
        match message {
            PageMessage::SelectedDomContent { content } => {
                debug!(chars = content.len(), "received DOM selection");
                self.state.selected_dom = Some(content);
            }
            other => debug!(message = ?other, "ignoring page message"),
        }
    }

    // ------------------------------------------------------------------
    // Settings and selection
    // ------------------------------------------------------------------

    fn on_settings_changed(&mut self, change: SettingsChange) {
        self.settings.apply_change(&change);

        let provider = match change.key {
            SettingKey::GroqApiKey => Some(Provider::Groq),
            SettingKey::OpenaiApiKey => Some(Provider::OpenAi),
            _ => None,
        };

        match (change.key, provider) {
            (_, Some(provider)) => match change.new_value.as_deref().filter(|k| !k.is_empty()) {
                Some(api_key) => {
                    debug!(%provider, "configured chat client");
                    self.clients
                        .insert(provider, self.factory.create(provider, api_key));
                }
                None => {
                    self.clients.remove(&provider);
                }
            },
            (SettingKey::SelectedModel, None) => {
                self.state.selected_model = change.new_value.unwrap_or_default();
            }
            (SettingKey::SelectedProvider, None) => {
                self.state.selected_provider = change.new_value.unwrap_or_default();
            }
            _ => {}
        }
    }

    fn on_selection_changed(&mut self, selection: Selection) {
        self.state.selection = selection.normalized();
        let key = self.state.selection.template_key();
        self.state.code_generator_type = key;
        self.settings.code_generator_type = Some(key.as_str().to_string());

        if let Err(e) = self.store.save(&self.settings) {
            warn!(error = %e, "failed to persist codeGeneratorType");
        }
    }

    // ------------------------------------------------------------------
    // Send
    // ------------------------------------------------------------------

    fn on_send_clicked(&mut self) -> Result<()> {
        let provider = Provider::from_selected(&self.state.selected_provider);
        if !self.clients.contains_key(&provider) {
            let err = DomscribeError::MissingCredential {
                provider: self.state.selected_provider.clone(),
            };
            self.transcript.push(Role::System, err.to_string());
            return Err(err);
        }

        let prepared = match self.prepare_prompt() {
            Ok(prepared) => prepared,
            Err(DomscribeError::NoSelection) => return Err(DomscribeError::NoSelection),
            Err(e) => return Err(self.report_failure(e)),
        };

        let result = self.generate(provider, prepared);
        self.state.send_enabled = true;
        result.map_err(|e| self.report_failure(e))
    }

    fn report_failure(&mut self, e: DomscribeError) -> DomscribeError {
        error!(error = %e, "generation failed");
        self.transcript.push(Role::System, format!("Error: {}", e));
        e
    }

    /// Resolve the snippet and render the prompt a send would use.
    ///
    /// Without a selected snippet the cached `combinedDomSnippet` is taken;
    /// with neither this fails with [`DomscribeError::NoSelection`].
    pub fn prepare_prompt(&mut self) -> Result<PreparedPrompt> {
        if self.state.selected_dom.is_none() {
            if let Some(cached) = self
                .settings
                .combined_dom_snippet
                .as_ref()
                .filter(|s| !s.is_empty())
            {
                debug!("using cached DOM snippet");
                self.state.selected_dom = Some(cached.clone());
            } else {
                let err = DomscribeError::NoSelection;
                self.transcript.push(Role::System, err.to_string());
                return Err(err);
            }
        }

        let tab = self.page.active_tab()?;
        let page_url = tab
            .as_ref()
            .map(|t| t.url.as_str())
            .filter(|u| !u.is_empty())
            .unwrap_or(UNKNOWN_PAGE_URL)
            .to_string();

        let key = self.state.selection.template_key();
        self.state.code_generator_type = key;
        let text = self.render_prompt(key, &page_url)?;

        Ok(PreparedPrompt { key, text, tab })
    }

    fn generate(&mut self, provider: Provider, prepared: PreparedPrompt) -> Result<()> {
        let client = self
            .clients
            .get(&provider)
            .ok_or_else(|| DomscribeError::MissingCredential {
                provider: self.state.selected_provider.clone(),
            })?;

        self.state.send_enabled = false;
        info!(%provider, model = %self.state.selected_model, template = %prepared.key, "generating");
        let response = client.send_message(&prepared.text, &self.state.selected_model)?;

        let text = extract_text(&response);
        self.transcript.push(Role::Assistant, text);

        self.state.clear_selection();
        if let Some(tab) = prepared.tab {
            self.clear_page_selection(&tab);
        }
        Ok(())
    }

    /// Render the prompt for `key` from the current state.
    pub fn render_prompt(&self, key: TemplateKey, page_url: &str) -> Result<String> {
        let snippet = self.state.selected_dom.as_deref().unwrap_or_default();

        let mut vars = Variables::new();
        vars.insert(VAR_DOM_CONTENT, snippet);
        vars.insert(VAR_PAGE_URL, page_url);
        vars.insert(VAR_JAVA_MODE, self.state.selection.java_mode().as_str());
        if let Some(ref action) = self.state.user_action {
            vars.insert(VAR_USER_ACTION, action.as_str());
        }

        self.templates.render_key(key, &vars)
    }

    /// Best-effort request for the page to drop its highlight.
    fn clear_page_selection(&self, tab: &Tab) {
        if let Err(e) = self.page.send(tab, PageMessage::ClearSelection) {
            debug!(error = %e, "direct CLEAR_SELECTION failed, posting over port");
            self.page.post(tab, PageMessage::ClearSelection);
        }
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    fn on_reset_clicked(&mut self) -> Result<()> {
        self.transcript.reset();
        self.state.clear_selection();
        self.state.send_enabled = true;

        match self.page.active_tab() {
            Ok(Some(tab)) if !tab.url.starts_with("chrome://") => {
                if let Err(e) = self.page.send(&tab, PageMessage::Cleanup) {
                    info!(error = %e, "Cleanup error");
                }
                if let Err(e) = ensure_observer(self.page, &tab) {
                    error!(error = %e, "Re-inject error");
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "Error resetting chat");
                self.transcript.push(Role::System, RESET_FAILED_MESSAGE);
                return Err(e);
            }
        }

        self.transcript.push(Role::System, INITIAL_SYSTEM_MESSAGE);
        Ok(())
    }
}
