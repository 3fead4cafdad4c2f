//! Error types for domscribe.
//!
//! Uses thiserror for derive macros. Messages are written to be shown
//! verbatim to the user, either on stderr or as a system transcript entry.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for domscribe operations.
#[derive(Error, Debug)]
pub enum DomscribeError {
    /// No API key is configured for the selected provider.
    #[error("Please set your {provider} API key in the Settings tab.")]
    MissingCredential {
        /// Provider name as the user selected it (may be empty).
        provider: String,
    },

    /// No DOM content has been captured and the snippet cache is empty.
    #[error("Please select DOM elements first using Inspect.")]
    NoSelection,

    /// A generator key outside the closed template set was requested.
    #[error("Prompt not found: {0}")]
    TemplateNotFound(String),

    /// The chat API rejected the request or could not be reached.
    #[error("{0}")]
    TransportFailure(String),

    /// The page observer could not be injected (restricted page, closed tab).
    #[error("Failed to inject page observer: {0}")]
    InjectionFailure(String),

    /// Invalid arguments, unreadable files, or malformed settings.
    #[error("{0}")]
    UserError(String),
}

impl DomscribeError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            DomscribeError::MissingCredential { .. } => exit_codes::USER_ERROR,
            DomscribeError::NoSelection => exit_codes::USER_ERROR,
            DomscribeError::UserError(_) => exit_codes::USER_ERROR,
            DomscribeError::TemplateNotFound(_) => exit_codes::TEMPLATE_FAILURE,
            DomscribeError::TransportFailure(_) => exit_codes::TRANSPORT_FAILURE,
            DomscribeError::InjectionFailure(_) => exit_codes::INJECTION_FAILURE,
        }
    }
}

/// Result type alias for domscribe operations.
pub type Result<T> = std::result::Result<T, DomscribeError>;
