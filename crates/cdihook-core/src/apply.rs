//! Hook plan application pipeline.
//!
//! Loads a plan, creates its symlinks, then merges linker search paths and
//! rebuilds the linker cache when the plan has any. Stages run in order and
//! the first failure aborts the rest; nothing already applied is rolled back.
//!
//! Invocations against the same container root are not serialized here.
//! Callers that may race (container start against hot-plug) must hold a
//! per-root lock around [`HookApplier::apply`].

use std::path::Path;

use cdihook_common::config::HookConfig;
use cdihook_common::error::{HookError, Result};
use cdihook_common::types::HookPlan;

use crate::exec::{CommandRunner, HostRunner};
use crate::filesystem::symlink::apply_symlinks;
use crate::linker::cache::regenerate_cache;
use crate::linker::conf::merge_linker_config;
use crate::plan::load_plan;

/// Summary of one application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Symlinks newly created.
    pub symlinks_created: usize,
    /// Lines appended to the linker configuration.
    pub linker_entries_added: usize,
    /// Whether `ldconfig` was run.
    pub cache_regenerated: bool,
}

/// Applies hook plans with a given configuration and command runner.
pub struct HookApplier {
    config: HookConfig,
    runner: Box<dyn CommandRunner>,
}

impl std::fmt::Debug for HookApplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookApplier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HookApplier {
    fn default() -> Self {
        Self::new(HookConfig::default())
    }
}

impl HookApplier {
    /// Creates an applier that runs host tools directly.
    #[must_use]
    pub fn new(config: HookConfig) -> Self {
        Self {
            config,
            runner: Box::new(HostRunner),
        }
    }

    /// Replaces the command runner used for `ldconfig`.
    #[must_use]
    pub fn with_runner(mut self, runner: impl CommandRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Loads the plan at `hooks_file` and applies it to `rootfs`.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any stage; see [`HookApplier::apply_plan`].
    pub fn apply(&self, hooks_file: &Path, rootfs: &Path) -> Result<ApplyReport> {
        let plan = load_plan(hooks_file)?;
        self.apply_plan(&plan, rootfs)
    }

    /// Applies an already loaded plan to `rootfs`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotFound`] if `rootfs` does not exist, or the
    /// first symlink, linker configuration, or cache failure.
    pub fn apply_plan(&self, plan: &HookPlan, rootfs: &Path) -> Result<ApplyReport> {
        if !rootfs.is_dir() {
            return Err(HookError::NotFound {
                path: rootfs.to_path_buf(),
            });
        }
        tracing::info!(
            rootfs = %rootfs.display(),
            symlinks = plan.symlinks.len(),
            ld_cache_updates = plan.ld_cache_updates.len(),
            "applying hook plan"
        );

        let mut report = ApplyReport {
            symlinks_created: apply_symlinks(rootfs, &plan.symlinks)?,
            ..ApplyReport::default()
        };

        if plan.ld_cache_updates.is_empty() {
            return Ok(report);
        }
        report.linker_entries_added =
            merge_linker_config(rootfs, &plan.ld_cache_updates, &self.config)?;
        regenerate_cache(rootfs, &self.config, self.runner.as_ref())?;
        report.cache_regenerated = true;

        Ok(report)
    }
}

/// Applies the hook plan at `hooks_file` to the container mounted at `rootfs`
/// with the default configuration.
///
/// Safe to call again for the same plan, as happens on hot-plug.
///
/// # Errors
///
/// Returns the first failure of any stage.
pub fn apply_hooks_to_container(hooks_file: &Path, rootfs: &Path) -> Result<()> {
    let _ = HookApplier::default().apply(hooks_file, rootfs)?;
    Ok(())
}
