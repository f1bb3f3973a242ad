//! All command: copy, replace and init in sequence

use anyhow::Result;
use camino::Utf8Path;
use refork_core::types::Visibility;

use crate::cli::AllArgs;
use crate::output;

pub async fn run(args: AllArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let organization = args.organization.as_deref();

    output::header(&format!("Creating {}", args.project_name));

    output::info("Step 1/3: copy");
    super::copy::execute(&config, &args.source, &args.destination, args.force)?;

    output::info("Step 2/3: replace");
    super::replace::execute(&config, &args.destination, &args.project_name, organization)?;

    output::info("Step 3/3: init");
    let outcome = super::init::execute(
        &config,
        &args.destination,
        &args.project_name,
        organization,
        Visibility::from_public_flag(args.public),
    )
    .await?;

    output::success(&format!("{} is ready at {}", args.project_name, outcome.url()));
    Ok(())
}
