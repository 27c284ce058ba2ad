//! `cdi-hook apply` — Apply a hook plan to a container root.

use std::path::PathBuf;

use anyhow::Context;
use cdihook_common::config::HookConfig;
use cdihook_core::HookApplier;
use clap::Args;

/// Arguments for the `apply` command.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Path to the hook plan file.
    pub hooks_file: PathBuf,

    /// Mounted root filesystem of the container.
    #[arg(long, env = "LXC_ROOTFS_MOUNT")]
    pub rootfs: PathBuf,
}

/// Executes the `apply` command.
///
/// Callers must not run two applications against the same root at once.
///
/// # Errors
///
/// Returns an error if any stage of the application fails.
pub fn execute(args: &ApplyArgs, config: HookConfig) -> anyhow::Result<()> {
    let report = HookApplier::new(config)
        .apply(&args.hooks_file, &args.rootfs)
        .with_context(|| {
            format!(
                "applying hooks {} to {}",
                args.hooks_file.display(),
                args.rootfs.display()
            )
        })?;

    tracing::info!(
        symlinks_created = report.symlinks_created,
        linker_entries_added = report.linker_entries_added,
        cache_regenerated = report.cache_regenerated,
        "hooks applied"
    );
    Ok(())
}
