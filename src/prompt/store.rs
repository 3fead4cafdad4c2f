//! The template store: generator key to prompt body, plus rendering.

use super::builtin::builtin_body;
use super::key::TemplateKey;
use super::template::{Variables, substitute, unresolved_placeholders};
use crate::error::{DomscribeError, Result};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Immutable mapping from generator key to prompt body.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: BTreeMap<TemplateKey, &'static str>,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateStore {
    /// Store holding every built-in template.
    pub fn builtin() -> Self {
        let templates = TemplateKey::ALL
            .into_iter()
            .map(|key| (key, builtin_body(key)))
            .collect();
        Self { templates }
    }

    /// Keys available in this store.
    pub fn keys(&self) -> impl Iterator<Item = TemplateKey> + '_ {
        self.templates.keys().copied()
    }

    /// Raw template body for a key name.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` if `name` is not one of the closed key set.
    pub fn get(&self, name: &str) -> Result<&'static str> {
        let key: TemplateKey = name.parse()?;
        self.templates
            .get(&key)
            .copied()
            .ok_or_else(|| DomscribeError::TemplateNotFound(name.to_string()))
    }

    /// Render the template named `name` with `variables`.
    ///
    /// Placeholders without a matching variable are left in the output; they
    /// are logged at `warn` so they show up when diagnosing odd prompts.
    pub fn render(&self, name: &str, variables: &Variables) -> Result<String> {
        let body = self.get(name)?;
        let rendered = substitute(body, variables);

        let leftover = unresolved_placeholders(&rendered);
        if leftover.is_empty() {
            debug!(template = name, chars = rendered.len(), "rendered prompt");
        } else {
            warn!(template = name, unresolved = ?leftover, "prompt has unresolved placeholders");
        }

        Ok(rendered)
    }

    /// Render a known key. Infallible for the built-in store.
    pub fn render_key(&self, key: TemplateKey, variables: &Variables) -> Result<String> {
        self.render(key.as_str(), variables)
    }
}

/// Render with the built-in store.
pub fn render(name: &str, variables: &Variables) -> Result<String> {
    TemplateStore::builtin().render(name, variables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::template::vars;

    #[test]
    fn builtin_store_has_all_keys() {
        let store = TemplateStore::builtin();
        let keys: Vec<_> = store.keys().collect();
        assert_eq!(keys.len(), TemplateKey::ALL.len());
    }

    #[test]
    fn cucumber_render_substitutes_all_supplied_values() {
        let out = render(
            "CUCUMBER_ONLY",
            &vars([
                ("domContent", "<input/>"),
                ("pageUrl", "http://x"),
                ("userAction", "login"),
            ]),
        )
        .unwrap();

        assert!(out.contains("<input/>"));
        assert!(out.contains("Given I open \"http://x\""));
        assert!(out.contains("I want to login"));
        assert!(!out.contains("${domContent}"));
        assert!(!out.contains("${userAction}"));
    }

    #[test]
    fn unsupplied_placeholder_is_left_verbatim() {
        let out = render("SELENIUM_JAVA_TEST_ONLY", &vars([("domContent", "<a/>")])).unwrap();
        assert!(out.contains("driver.get(\"${pageUrl}\")"));
    }

    #[test]
    fn rendered_prompt_is_trimmed() {
        let out = render("PLAYWRIGHT_JAVA_PAGE_ONLY", &vars([("domContent", "<b/>")])).unwrap();
        assert!(out.starts_with("Context:"));
        assert!(out.ends_with("```"));
    }

    #[test]
    fn unknown_key_fails_with_template_not_found() {
        let err = render("UNKNOWN", &Variables::new()).unwrap_err();
        assert!(matches!(err, DomscribeError::TemplateNotFound(ref k) if k == "UNKNOWN"));
    }

    #[test]
    fn key_names_are_case_sensitive() {
        let err = TemplateStore::builtin().get("cucumber_only").unwrap_err();
        assert!(matches!(err, DomscribeError::TemplateNotFound(_)));
    }
}
