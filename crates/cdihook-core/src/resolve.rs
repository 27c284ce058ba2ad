//! Lexical path resolution for symlink targets.
//!
//! Everything here is pure: paths are normalized and compared component by
//! component without touching the filesystem or following symlinks, so a
//! container root mounted anywhere on the host yields the same links.

use std::path::{Component, Path, PathBuf};

use cdihook_common::error::{HookError, Result};

/// Lexically normalizes a path.
///
/// Drops `.` components and repeated separators, folds `name/..` pairs,
/// and discards `..` directly under the root. An empty result becomes `.`.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    let _ = out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Expresses `target` relative to the directory that will contain `link`.
///
/// Relative targets are returned unchanged: they are already meant to be
/// read from the link's directory.
///
/// # Errors
///
/// Returns [`HookError::InvalidLink`] if `link` is not absolute, or
/// [`HookError::PathError`] if the two paths live under different prefixes.
pub fn resolve_relative(link: &str, target: &str) -> Result<PathBuf> {
    let link_path = Path::new(link);
    if !link_path.is_absolute() {
        return Err(HookError::InvalidLink {
            link: link.to_owned(),
            target: target.to_owned(),
        });
    }

    let target_path = Path::new(target);
    if !target_path.is_absolute() {
        return Ok(target_path.to_path_buf());
    }

    let link_clean = clean(link_path);
    let target_clean = clean(target_path);
    let link_dir = link_clean.parent().unwrap_or(&link_clean);

    relative_to(link_dir, &target_clean).ok_or_else(|| HookError::PathError {
        link: link.to_owned(),
        target: target.to_owned(),
    })
}

/// Relative path from directory `base` to `target`, both cleaned and absolute.
fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    let base: Vec<_> = base.components().collect();
    let target: Vec<_> = target.components().collect();
    if base.first() != target.first() {
        return None;
    }

    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component);
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    Some(rel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdihook_common::error::ErrorKind;

    #[test]
    fn clean_folds_dots_and_separators() {
        assert_eq!(clean(Path::new("/a/./b//c/")), PathBuf::from("/a/b/c"));
        assert_eq!(clean(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn clean_stops_at_root() {
        assert_eq!(clean(Path::new("/../../a")), PathBuf::from("/a"));
        assert_eq!(clean(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn clean_keeps_leading_parent_of_relative_paths() {
        assert_eq!(clean(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn resolves_sibling_directory() {
        let rel = resolve_relative("/a/b/link", "/a/c/lib.so").expect("resolve");
        assert_eq!(rel, PathBuf::from("../c/lib.so"));
    }

    #[test]
    fn resolved_path_joins_back_to_target() {
        let cases = [
            ("/a/b/link", "/a/c/lib.so"),
            ("/usr/lib/x/libfoo.so", "/usr/lib/libfoo.so"),
            ("/libfoo.so", "/usr/lib64/libfoo.so.1"),
            ("/opt/deep/nested/dir/link", "/opt/deep/nested/dir/sub/lib.so"),
        ];
        for (link, target) in cases {
            let rel = resolve_relative(link, target).expect("resolve");
            let dir = Path::new(link).parent().expect("parent");
            assert_eq!(clean(&dir.join(&rel)), clean(Path::new(target)), "{link} -> {target}");
        }
    }

    #[test]
    fn uncleaned_inputs_resolve_like_cleaned_ones() {
        let cleaned = resolve_relative("/a/b/link", "/a/c/lib.so").expect("resolve");
        let uncleaned =
            resolve_relative("/a/./b//link", "/a/b/../c/./lib.so").expect("resolve");
        assert_eq!(cleaned, uncleaned);
    }

    #[test]
    fn target_in_link_directory_is_plain_name() {
        let rel = resolve_relative("/usr/lib/libfoo.so", "/usr/lib/libfoo.so.1").expect("resolve");
        assert_eq!(rel, PathBuf::from("libfoo.so.1"));
    }

    #[test]
    fn target_equal_to_link_directory_is_dot() {
        let rel = resolve_relative("/a/b/link", "/a/b").expect("resolve");
        assert_eq!(rel, PathBuf::from("."));
    }

    #[test]
    fn link_at_root_descends_into_target() {
        let rel = resolve_relative("/libfoo.so", "/usr/lib/libfoo.so").expect("resolve");
        assert_eq!(rel, PathBuf::from("usr/lib/libfoo.so"));
    }

    #[test]
    fn relative_target_passes_through() {
        for link in ["/a/b/link", "/", "/usr/lib/x/libfoo.so"] {
            let rel = resolve_relative(link, "lib.so").expect("resolve");
            assert_eq!(rel, PathBuf::from("lib.so"));
        }
        let rel = resolve_relative("/a/link", "../x/./lib.so").expect("resolve");
        assert_eq!(rel, PathBuf::from("../x/./lib.so"));
    }

    #[test]
    fn relative_link_is_rejected() {
        for target in ["/a/c/lib.so", "lib.so", ""] {
            let err = resolve_relative("rel/path", target).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidLink);
        }
    }
}
