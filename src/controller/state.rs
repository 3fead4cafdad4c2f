//! Panel state owned by a single controller.

use crate::prompt::TemplateKey;
use crate::selection::Selection;

/// Inspector toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectorState {
    #[default]
    Idle,
    Inspecting,
}

impl InspectorState {
    pub fn toggled(self) -> Self {
        match self {
            InspectorState::Idle => InspectorState::Inspecting,
            InspectorState::Inspecting => InspectorState::Idle,
        }
    }
}

/// Mutable state behind the panel controls.
#[derive(Debug, Clone)]
pub struct PanelState {
    /// Snippet reported by the page, if any.
    pub selected_dom: Option<String>,
    pub inspector: InspectorState,
    pub selection: Selection,
    /// Cleared while a request is in flight.
    pub send_enabled: bool,
    pub selected_model: String,
    pub selected_provider: String,
    /// Generator resolved from the last selection change or send.
    pub code_generator_type: TemplateKey,
    /// Value for the `userAction` template variable.
    pub user_action: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            selected_dom: None,
            inspector: InspectorState::Idle,
            selection: Selection::default(),
            send_enabled: true,
            selected_model: String::new(),
            selected_provider: String::new(),
            code_generator_type: TemplateKey::SeleniumJavaPageOnly,
            user_action: None,
        }
    }
}

impl PanelState {
    /// Whether the inspect control shows the "has content" marker.
    pub fn has_content(&self) -> bool {
        self.selected_dom.is_some()
    }

    /// Drop the current selection and stop inspecting.
    pub fn clear_selection(&mut self) {
        self.selected_dom = None;
        self.inspector = InspectorState::Idle;
    }
}
