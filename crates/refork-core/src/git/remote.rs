//! Git remote management operations

use super::runner::{run_git, CommandRunner};
use crate::error::Result;
use camino::Utf8Path;
use tracing::{debug, info};

/// Point remote `name` at `url`, adding it or updating an existing one
///
/// `git remote add` is tried first; when it fails (usually because the
/// remote is already registered) the URL is updated with `git remote set-url`.
pub async fn ensure_remote(
    runner: &dyn CommandRunner,
    path: &Utf8Path,
    name: &str,
    url: &str,
) -> Result<()> {
    let added = runner
        .run("git", &["remote", "add", name, url], Some(path))
        .await?;

    if added.success() {
        info!("Remote '{}' added: {}", name, url);
        return Ok(());
    }

    debug!("git remote add failed ({}), updating URL", added.message());
    run_git(runner, path, &["remote", "set-url", name, url]).await?;
    info!("Remote '{}' updated: {}", name, url);
    Ok(())
}

/// Push `branch` to `remote`, setting upstream
pub async fn push_branch(
    runner: &dyn CommandRunner,
    path: &Utf8Path,
    remote: &str,
    branch: &str,
    force: bool,
) -> Result<()> {
    let mut args = vec!["push", "-u", remote, branch];
    if force {
        args.push("--force");
    }

    run_git(runner, path, &args).await?;
    Ok(())
}
