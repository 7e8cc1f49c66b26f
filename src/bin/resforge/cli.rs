//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// resforge - A build-time resource registry generator
#[derive(Parser)]
#[command(name = "resforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Extra config file, applied over the global and project config
    #[arg(long, global = true, env = "RESFORGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a resource tree without writing anything
    Check(CheckArgs),

    /// Build the registry and write its manifest
    Generate(GenerateArgs),

    /// Parse a qualifier suffix and print its dimensions
    Qualifier(QualifierArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Settings shared by `check` and `generate`.
#[derive(Args)]
pub struct RunArgs {
    /// Resource root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Fail when an entry has no default variant
    #[arg(long)]
    pub require_defaults: bool,

    /// Accept unknown qualifier segments
    #[arg(long)]
    pub lenient: bool,

    /// Number of parallel scan jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    /// Manifest output path
    #[arg(short, long, default_value = "build/resforge/manifest.json")]
    pub out: PathBuf,

    /// Target language for identifiers (kotlin, rust)
    #[arg(long)]
    pub language: Option<String>,

    /// Entries per shard
    #[arg(long)]
    pub shard_capacity: Option<usize>,
}

#[derive(Args)]
pub struct QualifierArgs {
    /// Qualifier suffix, e.g. `en-rUS-dark`
    pub qualifiers: String,

    /// Accept unknown qualifier segments
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
