//! Host command execution.
//!
//! Host tools run behind [`CommandRunner`] so the pipeline can be driven
//! with a fake in tests instead of the real binaries.

use std::ffi::OsString;
use std::path::Path;

/// Output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output followed by standard error.
    pub combined: String,
    /// Exit code, absent when terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Returns `true` when the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a program to completion and captures its output.
pub trait CommandRunner {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<CommandOutput>;
}

/// Runs commands directly on the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostRunner;

impl CommandRunner for HostRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<CommandOutput> {
        tracing::debug!(program = %program.display(), ?args, "running host command");
        let output = std::process::Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(CommandOutput {
            combined,
            exit_code: output.status.code(),
        })
    }
}
