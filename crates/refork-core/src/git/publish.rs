//! Publishing a scaffolded project to GitHub
//!
//! Runs a fixed sequence: check `gh` authentication, initialize and commit
//! locally, then `gh repo create --push`. When the repository already exists
//! the local tree is force-pushed to it instead.

use super::init::init_repository;
use super::remote::{ensure_remote, push_branch};
use super::runner::CommandRunner;
use crate::config::{GitConfig, ReforkConfig};
use crate::error::{Error, Result};
use crate::types::{InitOutcome, Visibility};
use crate::utils::{require, resolve_path};
use tracing::info;

/// Options for publishing a repository
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub project_name: String,
    pub organization: String,
    pub visibility: Visibility,
    pub git: GitConfig,
}

impl PublishOptions {
    /// Build options from configuration; `organization` falls back to the
    /// configured default
    pub fn from_config(
        config: &ReforkConfig,
        project_name: &str,
        organization: Option<&str>,
        visibility: Visibility,
    ) -> Self {
        Self {
            project_name: project_name.to_string(),
            organization: organization
                .unwrap_or(config.organization.as_str())
                .to_string(),
            visibility,
            git: config.git.clone(),
        }
    }

    /// `organization/project_name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.organization, self.project_name)
    }
}

/// Initialize a repository in `destination` and publish it
///
/// Every command runs with `destination` as its working directory; the
/// directory is expected to exist.
///
/// # Errors
/// Returns error if:
/// - `destination` or the project name is empty
/// - `gh auth status` fails ([`Error::GhNotAuthenticated`], no git command is run)
/// - A git step fails
/// - `gh repo create` fails for a reason other than an existing repository
pub async fn publish_repository(
    runner: &dyn CommandRunner,
    destination: &str,
    options: &PublishOptions,
) -> Result<InitOutcome> {
    require(destination, "Destination path")?;
    require(&options.project_name, "Project name")?;
    require(&options.organization, "Organization")?;

    let dest = resolve_path(destination)?;
    let git = &options.git;
    let url = git.web_url(&options.organization, &options.project_name);

    info!("Initializing Git repository in {}...", dest);

    check_gh_auth(runner).await?;

    init_repository(runner, &dest, &git.initial_commit_message).await?;

    info!("  Creating GitHub repository ({})...", options.visibility);
    let full_name = options.full_name();
    let remote_flag = format!("--remote={}", git.remote);
    let created = runner
        .run(
            "gh",
            &[
                "repo",
                "create",
                &full_name,
                options.visibility.as_flag(),
                "--source=.",
                &remote_flag,
                "--push",
            ],
            Some(&dest),
        )
        .await?;

    if created.success() {
        info!("Repository created and pushed to {}", url);
        return Ok(InitOutcome::Created { url });
    }

    let exists =
        created.stderr.contains("already exists") || created.stdout.contains("already exists");
    if !exists {
        return Err(Error::repo_create_failed(created.message()));
    }

    info!("  Repository already exists, setting up remote...");
    let ssh_url = git.ssh_url(&options.organization, &options.project_name);
    ensure_remote(runner, &dest, &git.remote, &ssh_url).await?;

    // The local branch name is not detected; the configured branch is pushed
    info!("  Pushing to existing repository...");
    push_branch(runner, &dest, &git.remote, &git.default_branch, true).await?;

    info!("Code pushed to existing repository: {}", url);
    Ok(InitOutcome::PushedToExisting { url })
}

/// Fail with [`Error::GhNotAuthenticated`] unless `gh auth status` succeeds
async fn check_gh_auth(runner: &dyn CommandRunner) -> Result<()> {
    info!("  Checking GitHub CLI authentication...");
    let status = runner.run("gh", &["auth", "status"], None).await?;

    if !status.success() {
        return Err(Error::GhNotAuthenticated {
            output: status.message().to_string(),
        });
    }

    Ok(())
}
