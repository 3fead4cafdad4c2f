//! domscribe: turn captured DOM snippets into page objects, tests and
//! feature files by prompting a hosted chat model.
//!
//! The library holds the prompt templates, the chat controller and its
//! collaborators. The `domscribe` binary drives the controller from the
//! command line against a static page.

pub mod controller;
pub mod error;
pub mod exit_codes;
pub mod extract;
pub mod fs;
pub mod logging;
pub mod markdown;
pub mod page;
pub mod prompt;
pub mod provider;
pub mod selection;
pub mod settings;
pub mod transcript;

pub use error::{DomscribeError, Result};
