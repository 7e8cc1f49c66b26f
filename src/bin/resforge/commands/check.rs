//! `resforge check` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::CheckArgs;

pub fn execute(args: CheckArgs, ctx: &CommandContext) -> Result<()> {
    let config = ctx.load_config(&args.run)?;
    let generation = ctx.run(&args.run, &config)?;

    let variants: usize = generation.table.iter().map(|e| e.variants.len()).sum();
    eprintln!(
        "     Checked {} resources ({} variants) in {} shards",
        generation.table.len(),
        variants,
        generation.plan.shards.len()
    );
    if !generation.warnings.is_empty() {
        eprintln!("     {} warnings", generation.warnings.len());
    }

    Ok(())
}
