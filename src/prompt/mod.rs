//! Prompt generation: generator keys, built-in bodies and substitution.
//!
//! - **Key**: the closed set of generators and the selection lookup table
//! - **Builtin**: prompt bodies compiled into the binary
//! - **Store**: key-to-body mapping and rendering
//! - **Template**: `${name}` substitution
//!
//! # Template Syntax
//!
//! ```text
//! Given the following DOM structure:
//! ${domContent}
//!
//! Given I open "${pageUrl}"
//! ```
//!
//! Variables consumed by the built-in bodies are `domContent`, `pageUrl`,
//! `javaMode` and `userAction`.

mod builtin;
mod key;
mod store;
mod template;

pub use builtin::builtin_body;
pub use key::{TemplateKey, resolve_template_key};
pub use store::{TemplateStore, render};
pub use template::{Variables, substitute, unresolved_placeholders, vars};

/// Template variable holding the captured DOM snippet.
pub const VAR_DOM_CONTENT: &str = "domContent";
/// Template variable holding the inspected page URL.
pub const VAR_PAGE_URL: &str = "pageUrl";
/// Template variable holding the Java generation mode (`PAGE`/`TEST`).
pub const VAR_JAVA_MODE: &str = "javaMode";
/// Template variable holding the user's described action.
pub const VAR_USER_ACTION: &str = "userAction";
