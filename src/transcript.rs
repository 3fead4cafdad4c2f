//! Append-only chat transcript.
//!
//! Entries are created in order and never mutated. System entries carry
//! plain text and are shown as-is; user and assistant entries are rendered
//! from Markdown to HTML when appended. A reset discards everything.
//!
//! The transcript can be exported as NDJSON (one JSON object per line) or
//! as a standalone HTML page.

use crate::error::{DomscribeError, Result};
use crate::markdown::{escape_html, render_html};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    /// Raw content as supplied.
    pub content: String,
    /// Display HTML. For system entries this is the content itself.
    pub html: String,
    pub created_at: DateTime<Utc>,
}

impl TranscriptEntry {
    fn new(role: Role, content: String) -> Self {
        let html = match role {
            Role::System => content.clone(),
            Role::User | Role::Assistant => render_html(&content),
        };
        Self {
            role,
            content,
            html,
            created_at: Utc::now(),
        }
    }
}

/// Ordered list of chat entries.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Empty content is ignored and returns `None`.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> Option<&TranscriptEntry> {
        let content = content.into();
        if content.is_empty() {
            return None;
        }
        self.entries.push(TranscriptEntry::new(role, content));
        self.entries.last()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the reset control should be offered.
    pub fn has_history(&self) -> bool {
        self.entries.len() > 1
            || self
                .entries
                .iter()
                .any(|e| e.role == Role::Assistant)
    }

    /// Discard every entry.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Serialize as NDJSON, one entry per line.
    pub fn to_ndjson(&self) -> Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            let line = serde_json::to_string(entry).map_err(|e| {
                DomscribeError::UserError(format!("failed to serialize transcript entry: {}", e))
            })?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// Render a standalone HTML page.
    pub fn to_html(&self, title: &str) -> String {
        let mut body = String::new();
        for entry in &self.entries {
            let inner = match entry.role {
                Role::System => escape_html(&entry.html),
                _ => format!("<div class=\"markdown-content\">{}</div>", entry.html),
            };
            body.push_str(&format!(
                "<div class=\"chat-message {}-message\">{}</div>\n",
                entry.role, inner
            ));
        }
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div id=\"chatMessages\">\n{}</div>\n</body>\n</html>\n",
            escape_html(title),
            body
        )
    }
}
