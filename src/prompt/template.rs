//! Placeholder substitution for prompt bodies.
//!
//! Templates reference caller values with `${name}` placeholders. Rendering
//! walks the supplied variables in insertion order and replaces every literal
//! occurrence of each placeholder with its value.
//!
//! # Semantics
//!
//! - Substitution is a single pass per variable. Values are not escaped, so a
//!   value containing `${other}` is rewritten if `other` comes later in the
//!   variable list, and left alone if it came earlier.
//! - Placeholders with no matching variable pass through untouched. This is
//!   intentionally lenient; use [`unresolved_placeholders`] to detect them.
//! - Leading and trailing whitespace of the result is trimmed.

use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("Invalid placeholder regex")
});

/// Ordered template variables.
///
/// Insertion order is the substitution order. Inserting an existing name
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    entries: Vec<(String, String)>,
}

impl Variables {
    /// Create an empty variable list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate variables in substitution order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// Helper to create variables from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> Variables
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs.into_iter().collect()
}

/// Substitute `${name}` placeholders in `template` and trim the result.
///
/// # Examples
///
/// ```
/// use domscribe::prompt::{substitute, vars};
///
/// let out = substitute("  Open ${pageUrl} as ${user} ", &vars([("pageUrl", "http://x")]));
/// assert_eq!(out, "Open http://x as ${user}");
/// ```
pub fn substitute(template: &str, variables: &Variables) -> String {
    let mut result = template.to_string();
    for (name, value) in variables.iter() {
        let placeholder = format!("${{{}}}", name);
        if result.contains(&placeholder) {
            result = result.replace(&placeholder, value);
        }
    }
    result.trim().to_string()
}

/// Names of `${name}` placeholders still present in `text`, in order of
/// first appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(text) {
        let name = caps[1].to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let vars = vars([("name", "Alice"), ("greeting", "Hello")]);
        let result = substitute("${greeting}, ${name}!", &vars);
        assert_eq!(result, "Hello, Alice!");
    }

    #[test]
    fn test_no_variables() {
        let result = substitute("Just plain text", &Variables::new());
        assert_eq!(result, "Just plain text");
    }

    #[test]
    fn test_result_is_trimmed() {
        let vars = vars([("x", "value")]);
        let result = substitute("\n   ${x}  \n\n", &vars);
        assert_eq!(result, "value");
    }

    #[test]
    fn test_unsupplied_placeholder_passes_through() {
        let vars = vars([("domContent", "<a/>")]);
        let result = substitute("${domContent} at ${pageUrl}", &vars);
        assert_eq!(result, "<a/> at ${pageUrl}");
    }

    #[test]
    fn test_multiple_occurrences() {
        let vars = vars([("x", "X")]);
        assert_eq!(substitute("${x}-${x}-${x}", &vars), "X-X-X");
    }

    #[test]
    fn test_bare_braces_are_not_placeholders() {
        let vars = vars([("x", "X")]);
        assert_eq!(substitute("{x} and $x and ${x}", &vars), "{x} and $x and X");
    }

    #[test]
    fn test_value_rewritten_by_later_variable() {
        let vars = vars([("a", "${b}"), ("b", "B")]);
        assert_eq!(substitute("${a}", &vars), "B");
    }

    #[test]
    fn test_value_not_rewritten_by_earlier_variable() {
        let vars = vars([("b", "B"), ("a", "${b}")]);
        assert_eq!(substitute("${a}", &vars), "${b}");
    }

    #[test]
    fn test_dollar_sequences_in_value_are_literal() {
        let vars = vars([("code", "cost: $1 and $$")]);
        assert_eq!(substitute("${code}", &vars), "cost: $1 and $$");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut vars = vars([("a", "1"), ("b", "2")]);
        vars.insert("a", "3");
        let collected: Vec<_> = vars.iter().collect();
        assert_eq!(collected, vec![("a", "3"), ("b", "2")]);
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_unresolved_placeholders() {
        let text = "Given ${domContent} open ${pageUrl} then ${domContent}";
        assert_eq!(
            unresolved_placeholders(text),
            vec!["domContent".to_string(), "pageUrl".to_string()]
        );
        assert!(unresolved_placeholders("nothing here").is_empty());
    }

    #[test]
    fn test_unicode_in_template_and_values() {
        let vars = vars([("emoji", "🎉"), ("text", "日本語")]);
        assert_eq!(substitute("Hello ${emoji} ${text}!", &vars), "Hello 🎉 日本語!");
    }
}
