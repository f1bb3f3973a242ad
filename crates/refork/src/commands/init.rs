//! Init command

use anyhow::{anyhow, Result};
use camino::Utf8Path;
use refork_core::config::ReforkConfig;
use refork_core::git::{
    classify_failure, failure_message, publish_repository, PublishOptions, SystemRunner,
};
use refork_core::types::{InitOutcome, Visibility};

use crate::cli::InitArgs;
use crate::output;

pub async fn run(args: InitArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    execute(
        &config,
        &args.destination,
        &args.project_name,
        args.organization.as_deref(),
        Visibility::from_public_flag(args.public),
    )
    .await?;

    Ok(())
}

/// Initialize git in `destination` and publish it to GitHub
///
/// Failures are turned into guidance for the user.
pub(crate) async fn execute(
    config: &ReforkConfig,
    destination: &str,
    project_name: &str,
    organization: Option<&str>,
    visibility: Visibility,
) -> Result<InitOutcome> {
    let options = PublishOptions::from_config(config, project_name, organization, visibility);

    output::header(&format!("Publishing {}", options.full_name()));
    output::kv("Visibility", &visibility.to_string());

    match publish_repository(&SystemRunner, destination, &options).await {
        Ok(outcome) => {
            match &outcome {
                InitOutcome::Created { url } => {
                    output::success(&format!("Repository created: {}", url))
                }
                InitOutcome::PushedToExisting { url } => {
                    output::warning("Repository already existed, local code was force-pushed");
                    output::success(&format!("Code pushed to: {}", url))
                }
            }
            Ok(outcome)
        }
        Err(e) => {
            let guidance = classify_failure(&e).guidance(
                &options.organization,
                &options.project_name,
                &failure_message(&e),
            );

            let mut text = guidance.summary;
            for hint in &guidance.hints {
                text.push_str("\n  ");
                text.push_str(hint);
            }
            Err(anyhow!(text))
        }
    }
}
