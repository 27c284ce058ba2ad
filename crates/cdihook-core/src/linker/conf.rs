//! Append-only merge of library directories into the linker config fragment.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use cdihook_common::config::HookConfig;
use cdihook_common::constants::CONF_FILE_MODE;
use cdihook_common::error::{HookError, Result};

use crate::filesystem::ensure_dir;

/// Adds `updates` to the linker configuration fragment under `rootfs`.
///
/// Existing lines are never rewritten or reordered. Updates already present
/// (compared after trimming whitespace) are skipped, as are repeats within
/// `updates`. An empty `updates` touches nothing. Returns the number of
/// lines appended.
///
/// # Errors
///
/// Returns an error if the configuration directory cannot be created or the
/// fragment cannot be inspected, read, or written.
pub fn merge_linker_config(rootfs: &Path, updates: &[String], config: &HookConfig) -> Result<usize> {
    if updates.is_empty() {
        return Ok(0);
    }

    ensure_dir(&config.linker_conf_dir_in(rootfs))?;

    let path = config.linker_conf_path_in(rootfs);
    let appended = match std::fs::metadata(&path) {
        Ok(_) => append_missing(&path, updates),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => write_new(&path, updates),
        Err(e) => Err(e),
    }
    .map_err(|e| HookError::Io {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), appended, "linker config merged");
    Ok(appended)
}

fn append_missing(path: &Path, updates: &[String]) -> std::io::Result<usize> {
    let mut file = OpenOptions::new().read(true).append(true).open(path)?;
    let mut raw = Vec::new();
    let _ = file.read_to_end(&mut raw)?;
    let content = String::from_utf8_lossy(&raw);

    let mut seen: HashSet<String> = content.lines().map(|l| l.trim().to_owned()).collect();
    let mut out = BufWriter::new(&file);
    if !content.is_empty() && !content.ends_with('\n') {
        writeln!(out)?;
    }
    let appended = write_entries(&mut out, updates, &mut seen)?;
    out.flush()?;
    Ok(appended)
}

fn write_new(path: &Path, updates: &[String]) -> std::io::Result<usize> {
    let file = create_conf_file(path)?;
    let mut out = BufWriter::new(file);
    let appended = write_entries(&mut out, updates, &mut HashSet::new())?;
    out.flush()?;
    Ok(appended)
}

fn write_entries<W: Write>(
    out: &mut W,
    updates: &[String],
    seen: &mut HashSet<String>,
) -> std::io::Result<usize> {
    let mut written = 0;
    for update in updates {
        if seen.insert(update.trim().to_owned()) {
            writeln!(out, "{update}")?;
            written += 1;
        }
    }
    Ok(written)
}

fn create_conf_file(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    let _ = options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let _ = options.mode(CONF_FILE_MODE);
    }
    #[cfg(not(unix))]
    let _ = CONF_FILE_MODE;
    options.open(path)
}
