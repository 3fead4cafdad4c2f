//! Blocking HTTP client for OpenAI-compatible chat completion APIs.

use super::{ChatClient, Provider};
use crate::error::{DomscribeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatRequest<'a> {
    /// A single-turn request carrying `prompt` as the user message.
    pub fn single(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for one provider and API key.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    http: reqwest::blocking::Client,
    provider: Provider,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleClient {
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self::with_base_url(provider, api_key, provider.base_url())
    }

    /// Point the client at a different host, e.g. a local proxy.
    pub fn with_base_url(
        provider: Provider,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        // No local timeout: the transport's own limits apply.
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            http,
            provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl ChatClient for OpenAiCompatibleClient {
    fn send_message(&self, prompt: &str, model: &str) -> Result<Value> {
        let model = if model.is_empty() {
            self.provider.default_model()
        } else {
            model
        };
        let url = self.endpoint();
        debug!(provider = %self.provider, model, url = %url, "sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest::single(model, prompt))
            .send()
            .map_err(|e| {
                DomscribeError::TransportFailure(format!(
                    "{} request failed: {}",
                    self.provider, e
                ))
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| {
            DomscribeError::TransportFailure(format!(
                "failed to read {} response: {}",
                self.provider, e
            ))
        })?;

        if !status.is_success() {
            warn!(provider = %self.provider, status = status.as_u16(), "chat completion rejected");
            return Err(DomscribeError::TransportFailure(api_error_message(
                self.provider,
                status.as_u16(),
                &body,
            )));
        }

        // Non-JSON bodies are passed through as a string.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

/// Error text for a non-2xx response, preferring the API's own message.
fn api_error_message(provider: Provider, status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => format!("{} API error ({}): {}", provider, status, envelope.error.message),
        Err(_) if body.trim().is_empty() => format!("{} API error ({})", provider, status),
        Err(_) => format!("{} API error ({}): {}", provider, status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_has_single_user_message() {
        let body = serde_json::to_value(ChatRequest::single("m", "hello")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "m",
                "messages": [{"role": "user", "content": "hello"}]
            })
        );
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = OpenAiCompatibleClient::with_base_url(Provider::Groq, "k", "http://localhost:9/v1/");
        assert_eq!(client.endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn default_endpoints() {
        let client = OpenAiCompatibleClient::new(Provider::OpenAi, "k");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn api_error_message_prefers_error_field() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(
            api_error_message(Provider::Groq, 401, body),
            "groq API error (401): Invalid API Key"
        );
    }

    #[test]
    fn api_error_message_falls_back_to_body() {
        assert_eq!(
            api_error_message(Provider::OpenAi, 502, "Bad Gateway\n"),
            "openai API error (502): Bad Gateway"
        );
        assert_eq!(
            api_error_message(Provider::OpenAi, 500, ""),
            "openai API error (500)"
        );
    }

    #[test]
    fn unreachable_host_is_transport_failure() {
        let client = OpenAiCompatibleClient::with_base_url(Provider::OpenAi, "k", "http://127.0.0.1:1");
        let err = client.send_message("hi", "").unwrap_err();
        assert!(matches!(err, DomscribeError::TransportFailure(_)));
    }
}
