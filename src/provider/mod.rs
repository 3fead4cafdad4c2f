//! Chat-completion providers.
//!
//! The controller talks to providers through the [`ChatClient`] trait so the
//! send flow is independent of the transport. [`OpenAiCompatibleClient`]
//! covers both supported hosts, which expose the same
//! `/chat/completions` API.

mod client;

pub use client::{ChatRequest, OpenAiCompatibleClient};

use crate::error::Result;
use serde_json::Value;
use std::fmt;

/// Hosted model provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Groq,
    OpenAi,
}

impl Provider {
    /// Resolve the `selectedProvider` setting. Only `groq` selects Groq;
    /// anything else, including an empty value, selects OpenAI.
    pub fn from_selected(selected: &str) -> Self {
        if selected == "groq" {
            Provider::Groq
        } else {
            Provider::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
        }
    }

    /// Base URL of the OpenAI-compatible API.
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1",
            Provider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Model used when none is selected.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability to send a prompt to a hosted model.
///
/// The returned value is the provider's response body; callers normalize
/// it with [`crate::extract::extract_text`].
pub trait ChatClient {
    fn send_message(&self, prompt: &str, model: &str) -> Result<Value>;
}

/// Builds a client for a provider once its API key is known.
pub trait ClientFactory {
    fn create(&self, provider: Provider, api_key: &str) -> Box<dyn ChatClient>;
}

/// Factory producing HTTP clients against the real endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn create(&self, provider: Provider, api_key: &str) -> Box<dyn ChatClient> {
        Box::new(OpenAiCompatibleClient::new(provider, api_key))
    }
}
