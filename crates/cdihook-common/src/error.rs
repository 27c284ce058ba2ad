//! Unified error types for the cdihook workspace.
//!
//! Every variant carries the path or plan entry it concerns so the caller
//! (a lifecycle hook or a hot-plug handler) can report a single descriptive
//! failure. [`HookError::kind`] gives a flat classification for branching.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum HookError {
    /// An input file or an expected path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// A hook plan or configuration file could not be decoded.
    #[error("failed decoding {path}: {source}")]
    Decode {
        /// File being decoded.
        path: PathBuf,
        /// Underlying decoder error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A symlink location is not an absolute path.
    #[error("link must be an absolute path: {link:?} (target: {target:?})")]
    InvalidLink {
        /// Offending link path.
        link: String,
        /// Target the link was meant to point at.
        target: String,
    },

    /// No relative path exists between the link directory and the target.
    #[error("cannot express {target:?} relative to the directory of {link:?}")]
    PathError {
        /// Link path.
        link: String,
        /// Target path.
        target: String,
    },

    /// A symlink entry of the plan failed to resolve.
    #[error("symlink entry {index} ({link:?}): {source}")]
    Entry {
        /// Position of the entry in the plan.
        index: usize,
        /// Link path of the entry.
        link: String,
        /// Resolution failure.
        source: Box<HookError>,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// An external tool exited unsuccessfully.
    #[error("{program} exited with {}: {output}", exit_label(.code))]
    Subprocess {
        /// Program that was run.
        program: PathBuf,
        /// Exit code, absent when terminated by a signal.
        code: Option<i32>,
        /// Combined standard output and standard error.
        output: String,
    },
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_owned(), |c| format!("status {c}"))
}

impl HookError {
    /// Wraps an I/O error, mapping a missing file to [`HookError::NotFound`].
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Classification of this error, looking through [`HookError::Entry`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidLink { .. } => ErrorKind::InvalidLink,
            Self::PathError { .. } => ErrorKind::PathError,
            Self::Entry { source, .. } => source.kind(),
            Self::Io { .. } => ErrorKind::Io,
            Self::Subprocess { .. } => ErrorKind::Subprocess,
        }
    }
}

/// Flat error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input file or expected path missing.
    NotFound,
    /// Malformed hook plan or configuration.
    Decode,
    /// Non-absolute link path.
    InvalidLink,
    /// Unresolvable relative path.
    PathError,
    /// Filesystem failure.
    Io,
    /// External tool failure.
    Subprocess,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::Decode => write!(f, "decode"),
            Self::InvalidLink => write!(f, "invalid-link"),
            Self::PathError => write!(f, "path"),
            Self::Io => write!(f, "io"),
            Self::Subprocess => write!(f, "subprocess"),
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, HookError>;
