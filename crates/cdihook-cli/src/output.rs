//! Formatted output helpers for CLI commands.

use std::path::Path;

/// Width of the link column: the longest link, in characters.
#[must_use]
pub fn link_column_width<'a>(links: impl IntoIterator<Item = &'a Path>) -> usize {
    links
        .into_iter()
        .map(|l| l.display().to_string().chars().count())
        .max()
        .unwrap_or(0)
}

/// Formats one symlink as `link -> target`, padding the link to `width`.
#[must_use]
pub fn format_symlink(link: &Path, target: &Path, width: usize) -> String {
    format!(
        "{:<width$} -> {}",
        link.display().to_string(),
        target.display()
    )
}
