//! External process execution
//!
//! Every `git` and `gh` invocation goes through [`CommandRunner`] with an
//! explicit working directory, so nothing depends on the process-wide
//! current directory and tests can script the responses.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::Utf8Path;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::{debug, warn};

/// Exit code and captured output of one external process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given exit code and stderr
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stderr when it has content, stdout otherwise
    pub fn message(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// Runs external programs and captures their output
///
/// Implementations must not fail on a non-zero exit code; callers inspect
/// [`CommandResult::exit_code`] instead.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<CommandResult>;
}

/// Runs programs with `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Utf8Path>,
    ) -> Result<CommandResult> {
        debug!("Running: {} {}", program, args.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await.map_err(|e| match e.kind() {
            // A missing working directory also reports NotFound
            ErrorKind::NotFound => match cwd {
                Some(dir) if !dir.is_dir() => Error::directory_not_found(dir.as_str()),
                _ => Error::command_not_found(program),
            },
            _ => Error::Io(e),
        })?;

        let result = CommandResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !result.success() {
            warn!(
                "Command failed: {} {}\nStderr: {}",
                program,
                args.join(" "),
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}

/// Run a git command, turning a non-zero exit into [`Error::GitOperation`]
pub(crate) async fn run_git(
    runner: &dyn CommandRunner,
    path: &Utf8Path,
    args: &[&str],
) -> Result<CommandResult> {
    let result = runner.run("git", args, Some(path)).await?;

    if !result.success() {
        return Err(Error::git_operation(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            result.message()
        )));
    }

    Ok(result)
}
