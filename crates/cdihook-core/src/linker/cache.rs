//! Linker cache regeneration.
//!
//! The cache is rebuilt by the host's `ldconfig` with `-r <rootfs>`, never
//! by anything inside the container, so container content is only read and
//! never executed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use cdihook_common::config::HookConfig;
use cdihook_common::constants::DEFAULT_LDCONFIG;
use cdihook_common::error::{HookError, Result};

use crate::exec::CommandRunner;

/// Deletes the container's linker cache, returning whether one existed.
///
/// # Errors
///
/// Returns an error if the cache exists but cannot be removed.
pub fn remove_stale_cache(rootfs: &Path, config: &HookConfig) -> Result<bool> {
    let path = config.linker_cache_path_in(rootfs);
    match std::fs::remove_file(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "stale linker cache removed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(HookError::Io { path, source: e }),
    }
}

/// Finds the host `ldconfig` binary.
///
/// Uses the configured path when set, then [`DEFAULT_LDCONFIG`], then a
/// `PATH` lookup.
///
/// # Errors
///
/// Returns [`HookError::NotFound`] if no `ldconfig` can be found.
pub fn locate_ldconfig(config: &HookConfig) -> Result<PathBuf> {
    if let Some(path) = &config.ldconfig {
        return Ok(path.clone());
    }
    let default = Path::new(DEFAULT_LDCONFIG);
    if default.is_file() {
        return Ok(default.to_path_buf());
    }
    which::which("ldconfig").map_err(|_| HookError::NotFound {
        path: PathBuf::from("ldconfig"),
    })
}

/// Removes the stale cache and rebuilds it for `rootfs` with the host `ldconfig`.
///
/// # Errors
///
/// Returns an error if the stale cache cannot be removed, `ldconfig` cannot
/// be found or spawned, or it exits unsuccessfully. In the last case the
/// error carries the tool's combined output.
pub fn regenerate_cache(rootfs: &Path, config: &HookConfig, runner: &dyn CommandRunner) -> Result<()> {
    let _ = remove_stale_cache(rootfs, config)?;

    let program = locate_ldconfig(config)?;
    let args: [OsString; 2] = ["-r".into(), rootfs.as_os_str().to_owned()];
    let output = runner
        .run(&program, &args)
        .map_err(|e| HookError::Io {
            path: program.clone(),
            source: e,
        })?;

    if !output.success() {
        return Err(HookError::Subprocess {
            program,
            code: output.exit_code,
            output: output.combined,
        });
    }

    tracing::info!(rootfs = %rootfs.display(), ldconfig = %program.display(), "linker cache regenerated");
    Ok(())
}
