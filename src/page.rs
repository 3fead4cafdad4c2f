//! Messaging between the panel and the inspected page.
//!
//! The page side runs a DOM observer that highlights elements and reports
//! the user's selection. The panel talks to it through a [`PageChannel`]:
//! it injects the observer, posts fire-and-forget port messages, and sends
//! direct messages that can fail.
//!
//! # Wire format
//!
//! Messages are JSON objects tagged by `type`:
//!
//! ```json
//! {"type": "TOGGLE_INSPECTOR", "reset": true}
//! {"type": "SELECTED_DOM_CONTENT", "content": "<input id=\"q\">"}
//! {"type": "CLEAR_SELECTION"}
//! {"type": "CLEANUP"}
//! ```

use crate::error::{DomscribeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tracing::debug;

/// URL prefixes the host refuses to inject into.
pub const RESTRICTED_URL_PREFIXES: [&str; 2] = ["chrome://", "chrome-extension://"];

/// Marker in injection errors that only mean the observer is already there.
pub const ALREADY_INJECTED: &str = "already been injected";

/// A message exchanged with the page observer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageMessage {
    /// Start or stop element picking.
    ToggleInspector {
        #[serde(default)]
        reset: bool,
    },
    /// The page reports the user's selection.
    SelectedDomContent { content: String },
    /// Remove selection highlights.
    ClearSelection,
    /// Tear down observer state.
    Cleanup,
}

impl PageMessage {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            DomscribeError::UserError(format!("failed to serialize page message: {}", e))
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomscribeError::UserError(format!("invalid page message: {}", e)))
    }
}

/// The active browser tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: u32,
    pub url: String,
}

impl Tab {
    pub fn is_restricted(&self) -> bool {
        is_restricted_url(&self.url)
    }
}

/// Whether the host forbids script injection into `url`.
pub fn is_restricted_url(url: &str) -> bool {
    RESTRICTED_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

/// Host API for reaching the inspected page.
pub trait PageChannel {
    /// The active tab of the current window, if any.
    fn active_tab(&self) -> Result<Option<Tab>>;

    /// Inject the DOM observer script. Errors whose message contains
    /// [`ALREADY_INJECTED`] are treated as success by callers.
    fn inject_observer(&self, tab: &Tab) -> Result<()>;

    /// Post over a freshly opened port. Fire-and-forget.
    fn post(&self, tab: &Tab, message: PageMessage);

    /// Send a direct message; fails if nothing in the page is listening.
    fn send(&self, tab: &Tab, message: PageMessage) -> Result<()>;

    /// Messages the page has sent since the last call.
    fn drain_incoming(&self) -> Vec<PageMessage> {
        Vec::new()
    }
}

/// Inject the observer, tolerating the already-injected error.
pub fn ensure_observer(channel: &dyn PageChannel, tab: &Tab) -> Result<()> {
    match channel.inject_observer(tab) {
        Err(e) if e.to_string().contains(ALREADY_INJECTED) => {
            debug!(tab = tab.id, "observer already injected");
            Ok(())
        }
        other => other,
    }
}

/// A page with a fixed URL and a pre-captured snippet.
///
/// Toggling the inspector on makes the page report its snippet, the way a
/// user click would in a browser. Used by the command-line front end.
#[derive(Debug)]
pub struct StaticPage {
    tab: Option<Tab>,
    snippet: Option<String>,
    state: Mutex<StaticPageState>,
}

#[derive(Debug, Default)]
struct StaticPageState {
    injected: bool,
    inspecting: bool,
    incoming: VecDeque<PageMessage>,
    outgoing: Vec<PageMessage>,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, snippet: Option<String>) -> Self {
        Self {
            tab: Some(Tab {
                id: 1,
                url: url.into(),
            }),
            snippet,
            state: Mutex::new(StaticPageState::default()),
        }
    }

    /// A window with no active tab.
    pub fn without_tab() -> Self {
        Self {
            tab: None,
            snippet: None,
            state: Mutex::new(StaticPageState::default()),
        }
    }

    /// Every message the panel delivered to the page, in order.
    pub fn delivered(&self) -> Vec<PageMessage> {
        self.lock().outgoing.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StaticPageState> {
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    fn receive(&self, message: PageMessage) {
        let mut state = self.lock();
        match &message {
            PageMessage::ToggleInspector { .. } => {
                state.inspecting = !state.inspecting;
                if state.inspecting
                    && let Some(ref snippet) = self.snippet
                {
                    state.incoming.push_back(PageMessage::SelectedDomContent {
                        content: snippet.clone(),
                    });
                }
            }
            PageMessage::Cleanup => {
                state.inspecting = false;
                state.injected = false;
            }
            PageMessage::ClearSelection | PageMessage::SelectedDomContent { .. } => {}
        }
        state.outgoing.push(message);
    }
}

impl PageChannel for StaticPage {
    fn active_tab(&self) -> Result<Option<Tab>> {
        Ok(self.tab.clone())
    }

    fn inject_observer(&self, tab: &Tab) -> Result<()> {
        if tab.is_restricted() {
            return Err(DomscribeError::InjectionFailure(format!(
                "cannot access contents of url \"{}\"",
                tab.url
            )));
        }
        let mut state = self.lock();
        if state.injected {
            return Err(DomscribeError::InjectionFailure(format!(
                "script has {}",
                ALREADY_INJECTED
            )));
        }
        state.injected = true;
        Ok(())
    }

    fn post(&self, _tab: &Tab, message: PageMessage) {
        self.receive(message);
    }

    fn send(&self, _tab: &Tab, message: PageMessage) -> Result<()> {
        if !self.lock().injected {
            return Err(DomscribeError::TransportFailure(
                "Could not establish connection. Receiving end does not exist.".to_string(),
            ));
        }
        self.receive(message);
        Ok(())
    }

    fn drain_incoming(&self) -> Vec<PageMessage> {
        self.lock().incoming.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_type_tag() {
        let json = PageMessage::ToggleInspector { reset: true }.to_json().unwrap();
        assert_eq!(json, r#"{"type":"TOGGLE_INSPECTOR","reset":true}"#);

        let json = PageMessage::ClearSelection.to_json().unwrap();
        assert_eq!(json, r#"{"type":"CLEAR_SELECTION"}"#);
    }

    #[test]
    fn parses_selected_content_from_page() {
        let msg = PageMessage::from_json(r#"{"type":"SELECTED_DOM_CONTENT","content":"<a/>"}"#)
            .unwrap();
        assert_eq!(
            msg,
            PageMessage::SelectedDomContent {
                content: "<a/>".to_string()
            }
        );
    }

    #[test]
    fn unknown_message_type_is_rejected() {
        assert!(PageMessage::from_json(r#"{"type":"PING"}"#).is_err());
    }

    #[test]
    fn restricted_urls() {
        assert!(is_restricted_url("chrome://settings"));
        assert!(is_restricted_url("chrome-extension://abc/panel.html"));
        assert!(!is_restricted_url("https://example.com"));
    }

    #[test]
    fn ensure_observer_tolerates_reinjection() {
        let page = StaticPage::new("https://example.com", None);
        let tab = page.active_tab().unwrap().unwrap();
        ensure_observer(&page, &tab).unwrap();
        ensure_observer(&page, &tab).unwrap();
        assert!(page.inject_observer(&tab).is_err());
    }

    #[test]
    fn static_page_reports_snippet_when_inspecting() {
        let page = StaticPage::new("https://example.com", Some("<b/>".to_string()));
        let tab = page.active_tab().unwrap().unwrap();

        page.post(&tab, PageMessage::ToggleInspector { reset: true });
        assert_eq!(
            page.drain_incoming(),
            vec![PageMessage::SelectedDomContent {
                content: "<b/>".to_string()
            }]
        );
        assert!(page.drain_incoming().is_empty());

        // Toggling off reports nothing.
        page.post(&tab, PageMessage::ToggleInspector { reset: true });
        assert!(page.drain_incoming().is_empty());
    }

    #[test]
    fn static_page_send_requires_injection() {
        let page = StaticPage::new("https://example.com", None);
        let tab = page.active_tab().unwrap().unwrap();
        assert!(page.send(&tab, PageMessage::ClearSelection).is_err());

        page.inject_observer(&tab).unwrap();
        page.send(&tab, PageMessage::ClearSelection).unwrap();
        assert_eq!(page.delivered(), vec![PageMessage::ClearSelection]);
    }

    #[test]
    fn static_page_refuses_restricted_tab() {
        let page = StaticPage::new("chrome://newtab", None);
        let tab = page.active_tab().unwrap().unwrap();
        let err = page.inject_observer(&tab).unwrap_err();
        assert!(matches!(err, DomscribeError::InjectionFailure(_)));
    }
}
