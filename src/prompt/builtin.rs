//! Built-in prompt bodies embedded at compile time.
//!
//! Every file under `templates/` is compiled into the binary via
//! [`include_str!`] so the generator works regardless of where it is
//! installed. When adding a template, add a [`TemplateKey`] variant and
//! extend [`builtin_body`].

use super::key::TemplateKey;

/// The raw body for a built-in key.
pub fn builtin_body(key: TemplateKey) -> &'static str {
    match key {
        TemplateKey::PlaywrightJavaPageOnly => {
            include_str!("../../templates/playwright_java_page.md")
        }
        TemplateKey::PlaywrightTypescriptPageOnly => {
            include_str!("../../templates/playwright_typescript_page.md")
        }
        TemplateKey::SeleniumJavaPageOnly => include_str!("../../templates/selenium_java_page.md"),
        TemplateKey::SeleniumJavaTestOnly => include_str!("../../templates/selenium_java_test.md"),
        TemplateKey::CucumberOnly => include_str!("../../templates/cucumber.md"),
    }
}
