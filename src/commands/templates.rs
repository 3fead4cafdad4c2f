//! Implementation of the `domscribe templates` subcommands.

use crate::cli::{TemplateRenderArgs, TemplateShowArgs};
use domscribe::error::{DomscribeError, Result};
use domscribe::prompt::{TemplateStore, Variables};

/// Execute `domscribe templates list`.
pub fn cmd_list() -> Result<()> {
    print!("{}", list(&TemplateStore::builtin()));
    Ok(())
}

/// Execute `domscribe templates show`.
pub fn cmd_show(args: TemplateShowArgs) -> Result<()> {
    println!("{}", TemplateStore::builtin().get(&args.key)?);
    Ok(())
}

/// Execute `domscribe templates render`.
pub fn cmd_render(args: TemplateRenderArgs) -> Result<()> {
    let variables = parse_vars(&args.vars)?;
    println!("{}", TemplateStore::builtin().render(&args.key, &variables)?);
    Ok(())
}

fn list(store: &TemplateStore) -> String {
    store
        .keys()
        .map(|key| format!("{:<33} {}\n", key.as_str(), key.label()))
        .collect()
}

/// Parse `name=value` pairs, keeping their order.
fn parse_vars(raw: &[String]) -> Result<Variables> {
    let mut variables = Variables::new();
    for pair in raw {
        let (name, value) = pair
            .split_once('=')
            .filter(|(name, _)| !name.trim().is_empty())
            .ok_or_else(|| {
                DomscribeError::UserError(format!(
                    "invalid variable '{}': expected NAME=VALUE",
                    pair
                ))
            })?;
        variables.insert(name.trim(), value);
    }
    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_has_every_key() {
        let listing = list(&TemplateStore::builtin());
        assert_eq!(listing.lines().count(), 5);
        assert!(listing.contains("CUCUMBER_ONLY"));
        assert!(listing.contains("Selenium-Java-Test-Only"));
    }

    #[test]
    fn parse_vars_keeps_order_and_equals_in_value() {
        let vars = parse_vars(&[
            "pageUrl=http://x/?a=b".to_string(),
            "domContent=<input/>".to_string(),
        ])
        .unwrap();
        let names: Vec<&str> = vars.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["pageUrl", "domContent"]);
        assert_eq!(vars.get("pageUrl"), Some("http://x/?a=b"));
    }

    #[test]
    fn parse_vars_allows_empty_value() {
        let vars = parse_vars(&["userAction=".to_string()]).unwrap();
        assert_eq!(vars.get("userAction"), Some(""));
    }

    #[test]
    fn parse_vars_rejects_missing_name() {
        assert!(parse_vars(&["=x".to_string()]).is_err());
        assert!(parse_vars(&["novalue".to_string()]).is_err());
    }
}
