//! Filesystem helpers for mutating a container root from the host.
//!
//! Paths from the hook plan are container paths. They are mapped under the
//! host-visible root mount lexically, so `..` can never climb above it.

pub mod symlink;

use std::path::{Component, Path, PathBuf};

use cdihook_common::constants::DIR_MODE;
use cdihook_common::error::{HookError, Result};

use crate::resolve::clean;

/// Maps a container path to its location under the host-visible `rootfs`.
#[must_use]
pub fn path_in_root(rootfs: &Path, container_path: &Path) -> PathBuf {
    let cleaned = clean(container_path);
    let mut host = rootfs.to_path_buf();
    for component in cleaned.components() {
        if let Component::Normal(name) = component {
            host.push(name);
        }
    }
    host
}

/// Creates `dir` and any missing parents with mode `0755`.
///
/// # Errors
///
/// Returns an error if any directory cannot be created.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    let _ = builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        let _ = builder.mode(DIR_MODE);
    }
    #[cfg(not(unix))]
    let _ = DIR_MODE;

    builder.create(dir).map_err(|e| HookError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}
