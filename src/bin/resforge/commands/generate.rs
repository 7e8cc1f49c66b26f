//! `resforge generate` command

use anyhow::Result;

use super::CommandContext;
use crate::cli::GenerateArgs;
use resforge::ops::write_manifest;
use resforge::sanitizer::TargetLanguage;

pub fn execute(args: GenerateArgs, ctx: &CommandContext) -> Result<()> {
    let mut config = ctx.load_config(&args.run)?;

    // Parse --language flag (CLI overrides config)
    if let Some(ref language) = args.language {
        let language = language
            .parse::<TargetLanguage>()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        config.sanitizer.target_language = Some(language);
    }
    if args.shard_capacity.is_some() {
        config.sanitizer.shard_capacity = args.shard_capacity;
    }

    let generation = ctx.run(&args.run, &config)?;
    let manifest = generation.manifest();
    write_manifest(&args.out, &manifest)?;

    eprintln!(
        "   Generated {} resources in {} shards ({})",
        manifest.entries.len(),
        manifest.shards.len(),
        args.out.display()
    );

    Ok(())
}
