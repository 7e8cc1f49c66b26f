//! Command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod qualifier;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::cli::{Cli, RunArgs};
use resforge::core::GenerateError;
use resforge::ops::{self, GenerateOptions, Generation};
use resforge::util::config::{global_config_path, load_config, project_config_path, Config};
use resforge::util::diagnostic::emit;
use resforge::CancellationToken;

/// Global flags every command may need.
pub struct CommandContext {
    /// Explicit config file, merged over the project config
    pub config_path: Option<PathBuf>,
    /// Whether diagnostics are colored
    pub color: bool,
}

impl CommandContext {
    pub fn new(cli: &Cli) -> Self {
        CommandContext {
            config_path: cli.config.clone(),
            color: !cli.no_color && std::io::stderr().is_terminal(),
        }
    }

    /// Load configuration (global + project) for a resource root.
    pub fn load_config(&self, args: &RunArgs) -> Result<Config> {
        let global = global_config_path();
        let mut config = load_config(global.as_deref(), &project_config_path(&args.root))?;
        if let Some(ref path) = self.config_path {
            config.merge(Config::load(path)?);
        }

        // CLI flags override config
        if args.require_defaults {
            config.generator.require_defaults = Some(true);
        }
        if args.lenient {
            config.generator.strict_qualifiers = Some(false);
        }
        if args.jobs.is_some() {
            config.scan.jobs = args.jobs;
        }

        Ok(config)
    }

    /// Run generation, rendering warnings and the error diagnostic.
    pub fn run(&self, args: &RunArgs, config: &Config) -> Result<Generation> {
        if !args.root.is_dir() {
            bail!("resource root `{}` is not a directory", args.root.display());
        }

        let options = GenerateOptions::from_config(config).map_err(|e| self.report(e))?;
        let generation =
            ops::generate(&args.root, &options, &CancellationToken::new())
                .map_err(|e| self.report(e))?;

        for warning in &generation.warnings {
            emit(&warning.to_diagnostic(), self.color);
        }

        Ok(generation)
    }

    fn report(&self, err: GenerateError) -> anyhow::Error {
        emit(&err.to_diagnostic(), self.color);
        anyhow::anyhow!("could not build the resource registry")
    }
}
