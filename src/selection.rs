//! Generation selection state: language binding, browser engine and mode.
//!
//! The panel offers a language and engine dropdown plus a page/test radio
//! for Selenium Java. This module models that state and resolves it to a
//! [`TemplateKey`].

use crate::error::{DomscribeError, Result};
use crate::prompt::{TemplateKey, resolve_template_key};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language binding for generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    Java,
    Typescript,
    /// Any other binding; always resolves to the Cucumber generator.
    Other(String),
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::Java => "java",
            Language::Typescript => "typescript",
            Language::Other(s) => s,
        }
    }
}

impl FromStr for Language {
    type Err = DomscribeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err(DomscribeError::UserError(
                "language binding must not be empty".to_string(),
            ));
        }
        Ok(match s.as_str() {
            "java" => Language::Java,
            "typescript" | "ts" => Language::Typescript,
            _ => Language::Other(s),
        })
    }
}

/// Browser automation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Engine {
    Selenium,
    Playwright,
    Other(String),
}

impl Engine {
    pub fn as_str(&self) -> &str {
        match self {
            Engine::Selenium => "selenium",
            Engine::Playwright => "playwright",
            Engine::Other(s) => s,
        }
    }
}

impl FromStr for Engine {
    type Err = DomscribeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err(DomscribeError::UserError(
                "browser engine must not be empty".to_string(),
            ));
        }
        Ok(match s.as_str() {
            "selenium" => Engine::Selenium,
            "playwright" => Engine::Playwright,
            _ => Engine::Other(s),
        })
    }
}

/// Whether Selenium Java output is a page-object class or a test class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GenerationMode {
    Page,
    Test,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Page => "PAGE",
            GenerationMode::Test => "TEST",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = DomscribeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PAGE" => Ok(GenerationMode::Page),
            "TEST" => Ok(GenerationMode::Test),
            other => Err(DomscribeError::UserError(format!(
                "invalid generation mode '{}': expected 'page' or 'test'",
                other.to_lowercase()
            ))),
        }
    }
}

/// The transient (language, engine, mode) tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub language: Language,
    pub engine: Engine,
    pub mode: Option<GenerationMode>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            language: Language::Java,
            engine: Engine::Selenium,
            mode: None,
        }
    }
}

impl Selection {
    pub fn new(language: Language, engine: Engine, mode: Option<GenerationMode>) -> Self {
        Self {
            language,
            engine,
            mode,
        }
    }

    /// Apply the dropdown constraint: TypeScript only pairs with Playwright.
    pub fn normalized(mut self) -> Self {
        if self.language == Language::Typescript {
            self.engine = Engine::Playwright;
        }
        self
    }

    /// Resolve to a generator key.
    pub fn template_key(&self) -> TemplateKey {
        resolve_template_key(
            self.language.as_str(),
            self.engine.as_str(),
            self.mode.map(|m| m.as_str()),
        )
    }

    /// Value for the `javaMode` template variable.
    ///
    /// Only Selenium Java generators read the radio; everything else
    /// reports `TEST`.
    pub fn java_mode(&self) -> GenerationMode {
        if self.template_key().is_selenium_java() {
            self.mode.unwrap_or(GenerationMode::Test)
        } else {
            GenerationMode::Test
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(lang: &str, engine: &str, mode: Option<&str>) -> Selection {
        Selection::new(
            lang.parse().unwrap(),
            engine.parse().unwrap(),
            mode.map(|m| m.parse().unwrap()),
        )
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("Java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!("PLAYWRIGHT".parse::<Engine>().unwrap(), Engine::Playwright);
        assert_eq!("page".parse::<GenerationMode>().unwrap(), GenerationMode::Page);
    }

    #[test]
    fn unknown_language_is_kept_as_other() {
        assert_eq!(
            "python".parse::<Language>().unwrap(),
            Language::Other("python".to_string())
        );
    }

    #[test]
    fn empty_language_is_rejected() {
        assert!("  ".parse::<Language>().is_err());
        assert!("".parse::<Engine>().is_err());
    }

    #[test]
    fn invalid_mode_is_rejected() {
        let err = "both".parse::<GenerationMode>().unwrap_err();
        assert!(err.to_string().contains("invalid generation mode"));
    }

    #[test]
    fn typescript_forces_playwright() {
        let sel = selection("typescript", "selenium", None).normalized();
        assert_eq!(sel.engine, Engine::Playwright);

        let sel = selection("java", "selenium", None).normalized();
        assert_eq!(sel.engine, Engine::Selenium);
    }

    #[test]
    fn template_key_follows_lookup_table() {
        assert_eq!(
            selection("java", "selenium", Some("page")).template_key(),
            TemplateKey::SeleniumJavaPageOnly
        );
        assert_eq!(
            selection("java", "selenium", None).template_key(),
            TemplateKey::SeleniumJavaTestOnly
        );
        assert_eq!(
            selection("java", "playwright", Some("page")).template_key(),
            TemplateKey::PlaywrightJavaPageOnly
        );
        assert_eq!(
            selection("typescript", "playwright", None).template_key(),
            TemplateKey::CucumberOnly
        );
    }

    #[test]
    fn java_mode_only_read_for_selenium_java() {
        assert_eq!(
            selection("java", "selenium", Some("page")).java_mode(),
            GenerationMode::Page
        );
        assert_eq!(
            selection("java", "selenium", None).java_mode(),
            GenerationMode::Test
        );
        assert_eq!(
            selection("java", "playwright", Some("page")).java_mode(),
            GenerationMode::Test
        );
    }

    #[test]
    fn default_selection_is_selenium_java() {
        let sel = Selection::default();
        assert_eq!(sel.template_key(), TemplateKey::SeleniumJavaTestOnly);
    }
}
