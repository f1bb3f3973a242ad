//! Local repository initialization

use super::runner::{run_git, CommandRunner};
use crate::error::Result;
use camino::Utf8Path;
use tracing::info;

/// Initialize a repository at `path`, stage everything and commit it
///
/// # Errors
/// Returns error if any of `git init`, `git add .` or `git commit` fails.
pub async fn init_repository(
    runner: &dyn CommandRunner,
    path: &Utf8Path,
    commit_message: &str,
) -> Result<()> {
    info!("  Initializing git...");
    run_git(runner, path, &["init"]).await?;

    info!("  Adding files...");
    run_git(runner, path, &["add", "."]).await?;

    info!("  Creating initial commit...");
    run_git(runner, path, &["commit", "-m", commit_message]).await?;

    Ok(())
}
