//! CLI command definitions and dispatch.

pub mod apply;
pub mod plan;

use std::path::PathBuf;

use anyhow::Context;
use cdihook_common::config::HookConfig;
use clap::{Parser, Subcommand};

/// cdi-hook — apply device-passthrough hook plans to container roots.
#[derive(Parser, Debug)]
#[command(name = cdihook_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// JSON file overriding the default names and paths.
    #[arg(long, global = true, env = "CDIHOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host `ldconfig` binary used to rebuild the container's linker cache.
    #[arg(long, global = true, env = "CDIHOOK_LDCONFIG")]
    pub ldconfig: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a hook plan to a container root filesystem.
    Apply(apply::ApplyArgs),
    /// Show what a hook plan would create, without touching any root.
    Plan(plan::PlanArgs),
}

impl Cli {
    /// Builds the effective configuration from `--config` and `--ldconfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded.
    pub fn hook_config(&self) -> anyhow::Result<HookConfig> {
        let mut config = match &self.config {
            Some(path) => HookConfig::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => HookConfig::default(),
        };
        if let Some(ldconfig) = &self.ldconfig {
            config.ldconfig = Some(ldconfig.clone());
        }
        Ok(config)
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.hook_config()?;
    match cli.command {
        Command::Apply(args) => apply::execute(&args, config),
        Command::Plan(args) => plan::execute(&args),
    }
}
