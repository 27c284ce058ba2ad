//! Symlink materialization under a container root.
//!
//! Every entry is resolved before anything is written, so a plan with one
//! bad link leaves the root untouched. Creation itself is idempotent: a path
//! that already exists counts as applied, which lets hot-plug re-run a plan.

use std::path::{Path, PathBuf};

use cdihook_common::error::{HookError, Result};
use cdihook_common::types::SymlinkEntry;

use super::{ensure_dir, path_in_root};
use crate::resolve::resolve_relative;

/// A plan entry with its target rewritten relative to the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymlink {
    /// Position of the entry in the plan.
    pub index: usize,
    /// Link location inside the container.
    pub link: PathBuf,
    /// Link-relative target to write into the symlink.
    pub target: PathBuf,
}

/// Resolves every entry's target, failing on the first invalid one.
///
/// # Errors
///
/// Returns [`HookError::Entry`] wrapping the resolution failure.
pub fn resolve_symlinks(entries: &[SymlinkEntry]) -> Result<Vec<ResolvedSymlink>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let target =
                resolve_relative(&entry.link, &entry.target).map_err(|e| HookError::Entry {
                    index,
                    link: entry.link.clone(),
                    source: Box::new(e),
                })?;
            Ok(ResolvedSymlink {
                index,
                link: PathBuf::from(&entry.link),
                target,
            })
        })
        .collect()
}

/// Creates the plan's symlinks under `rootfs`, in order.
///
/// Returns how many links were newly created. Links created before a
/// failure are left in place.
///
/// # Errors
///
/// Returns an error if an entry fails to resolve, a parent directory cannot
/// be created, or a symlink cannot be created for a reason other than the
/// path already existing.
pub fn apply_symlinks(rootfs: &Path, entries: &[SymlinkEntry]) -> Result<usize> {
    let resolved = resolve_symlinks(entries)?;
    let mut created = 0;
    for symlink in &resolved {
        if create_symlink(rootfs, symlink)? {
            created += 1;
        }
    }
    tracing::info!(
        rootfs = %rootfs.display(),
        total = resolved.len(),
        created,
        "symlinks applied"
    );
    Ok(created)
}

/// Creates one symlink, returning `false` when the path already existed.
fn create_symlink(rootfs: &Path, symlink: &ResolvedSymlink) -> Result<bool> {
    let host_path = path_in_root(rootfs, &symlink.link);
    if let Some(parent) = host_path.parent() {
        ensure_dir(parent)?;
    }

    match make_symlink(&symlink.target, &host_path) {
        Ok(()) => {
            tracing::debug!(
                link = %host_path.display(),
                target = %symlink.target.display(),
                "symlink created"
            );
            Ok(true)
        }
        // TODO: compare the existing link's target and report a mismatch once
        // hot-plug callers have a policy for devices whose paths moved.
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            tracing::debug!(link = %host_path.display(), "symlink already present");
            Ok(false)
        }
        Err(e) => Err(HookError::Io {
            path: host_path,
            source: e,
        }),
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "container symlinks require a unix host",
    ))
}
