//! resforge CLI - A build-time resource registry generator

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("resforge=debug")
    } else {
        EnvFilter::new("resforge=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let ctx = CommandContext::new(&cli);

    // Execute command
    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Generate(args) => commands::generate::execute(args, &ctx),
        Commands::Qualifier(args) => commands::qualifier::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
