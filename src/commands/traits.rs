//! Trait table output

use crate::{scoring::TraitTable, Result};

use super::CommandContext;

/// Pretty JSON for a trait table; the same shape `--traits` accepts
pub fn trait_table_json(table: &TraitTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Handle the traits command
pub fn handle_traits(ctx: &CommandContext) -> Result<()> {
    println!("{}", trait_table_json(ctx.engine.table())?);
    Ok(())
}
