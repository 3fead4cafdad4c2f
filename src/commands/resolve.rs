//! Implementation of the `domscribe resolve` command.

use crate::cli::ResolveArgs;
use domscribe::error::Result;
use domscribe::prompt::TemplateKey;
use domscribe::selection::{GenerationMode, Selection};

/// Resolve the generator key the panel would use for these dropdowns.
///
/// The selection is normalized first, so `typescript` always pairs with
/// `playwright`.
pub fn resolve(args: &ResolveArgs) -> Result<TemplateKey> {
    let mode = args
        .mode
        .as_deref()
        .map(|m| m.parse::<GenerationMode>())
        .transpose()?;
    let selection = Selection::new(args.language.parse()?, args.engine.parse()?, mode);
    Ok(selection.normalized().template_key())
}

/// Execute the `domscribe resolve` command.
pub fn cmd_resolve(args: ResolveArgs) -> Result<()> {
    println!("{}", resolve(&args)?);
    Ok(())
}
