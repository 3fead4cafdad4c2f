//! Generator keys and the selection lookup table.

use crate::error::DomscribeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one built-in prompt body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateKey {
    PlaywrightJavaPageOnly,
    PlaywrightTypescriptPageOnly,
    SeleniumJavaPageOnly,
    SeleniumJavaTestOnly,
    CucumberOnly,
}

impl TemplateKey {
    /// Every key, in display order.
    pub const ALL: [TemplateKey; 5] = [
        TemplateKey::PlaywrightJavaPageOnly,
        TemplateKey::SeleniumJavaPageOnly,
        TemplateKey::SeleniumJavaTestOnly,
        TemplateKey::CucumberOnly,
        TemplateKey::PlaywrightTypescriptPageOnly,
    ];

    /// Canonical key name, e.g. `SELENIUM_JAVA_TEST_ONLY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKey::PlaywrightJavaPageOnly => "PLAYWRIGHT_JAVA_PAGE_ONLY",
            TemplateKey::PlaywrightTypescriptPageOnly => "PLAYWRIGHT_TYPESCRIPT_PAGE_ONLY",
            TemplateKey::SeleniumJavaPageOnly => "SELENIUM_JAVA_PAGE_ONLY",
            TemplateKey::SeleniumJavaTestOnly => "SELENIUM_JAVA_TEST_ONLY",
            TemplateKey::CucumberOnly => "CUCUMBER_ONLY",
        }
    }

    /// Human-readable generator name shown in pickers.
    pub fn label(&self) -> &'static str {
        match self {
            TemplateKey::PlaywrightJavaPageOnly => "Playwright-Java-Page-Only",
            TemplateKey::PlaywrightTypescriptPageOnly => "Playwright-Typescript-Page-Only",
            TemplateKey::SeleniumJavaPageOnly => "Selenium-Java-Page-Only",
            TemplateKey::SeleniumJavaTestOnly => "Selenium-Java-Test-Only",
            TemplateKey::CucumberOnly => "Cucumber-Only",
        }
    }

    /// Whether the key produces Selenium Java code, which consumes `javaMode`.
    pub fn is_selenium_java(&self) -> bool {
        matches!(
            self,
            TemplateKey::SeleniumJavaPageOnly | TemplateKey::SeleniumJavaTestOnly
        )
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKey {
    type Err = DomscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| DomscribeError::TemplateNotFound(s.to_string()))
    }
}

/// Resolve a (language, engine, mode) selection to a generator key.
///
/// - `java` + `selenium`: `PAGE` mode selects the page-object prompt; a
///   missing or any other mode selects the test-class prompt.
/// - `java` + `playwright`: the Playwright Java page prompt, whatever the mode.
/// - anything else: the Cucumber prompt. This includes `typescript` +
///   `playwright`, which never reaches `PLAYWRIGHT_TYPESCRIPT_PAGE_ONLY`.
pub fn resolve_template_key(language: &str, engine: &str, mode: Option<&str>) -> TemplateKey {
    match (language, engine) {
        ("java", "selenium") => {
            if mode.is_some_and(|m| m.eq_ignore_ascii_case("PAGE")) {
                TemplateKey::SeleniumJavaPageOnly
            } else {
                TemplateKey::SeleniumJavaTestOnly
            }
        }
        ("java", "playwright") => TemplateKey::PlaywrightJavaPageOnly,
        _ => TemplateKey::CucumberOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selenium_java_without_mode_is_test() {
        assert_eq!(
            resolve_template_key("java", "selenium", None),
            TemplateKey::SeleniumJavaTestOnly
        );
    }

    #[test]
    fn selenium_java_page_mode_is_page() {
        assert_eq!(
            resolve_template_key("java", "selenium", Some("PAGE")),
            TemplateKey::SeleniumJavaPageOnly
        );
        assert_eq!(
            resolve_template_key("java", "selenium", Some("TEST")),
            TemplateKey::SeleniumJavaTestOnly
        );
    }

    #[test]
    fn playwright_java_ignores_mode() {
        for mode in [None, Some("PAGE"), Some("TEST"), Some("whatever")] {
            assert_eq!(
                resolve_template_key("java", "playwright", mode),
                TemplateKey::PlaywrightJavaPageOnly
            );
        }
    }

    #[test]
    fn other_combinations_fall_back_to_cucumber() {
        assert_eq!(
            resolve_template_key("python", "selenium", Some("PAGE")),
            TemplateKey::CucumberOnly
        );
        assert_eq!(
            resolve_template_key("typescript", "playwright", None),
            TemplateKey::CucumberOnly
        );
    }

    #[test]
    fn key_names_round_trip_through_from_str() {
        for key in TemplateKey::ALL {
            assert_eq!(key.as_str().parse::<TemplateKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_name_is_template_not_found() {
        let err = "JEST_ONLY".parse::<TemplateKey>().unwrap_err();
        assert!(matches!(err, DomscribeError::TemplateNotFound(ref k) if k == "JEST_ONLY"));
    }

    #[test]
    fn serde_uses_screaming_snake_names() {
        let json = serde_json::to_string(&TemplateKey::CucumberOnly).unwrap();
        assert_eq!(json, "\"CUCUMBER_ONLY\"");
    }

    #[test]
    fn only_selenium_keys_consume_java_mode() {
        assert!(TemplateKey::SeleniumJavaPageOnly.is_selenium_java());
        assert!(TemplateKey::SeleniumJavaTestOnly.is_selenium_java());
        assert!(!TemplateKey::PlaywrightJavaPageOnly.is_selenium_java());
        assert!(!TemplateKey::CucumberOnly.is_selenium_java());
    }
}
