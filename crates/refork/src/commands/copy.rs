//! Copy command

use anyhow::Result;
use camino::Utf8Path;
use refork_core::config::ReforkConfig;
use refork_core::copier::{copy_project_with_progress, CopyOptions};
use refork_core::types::CopyReport;

use crate::cli::CopyArgs;
use crate::output;

pub fn run(args: CopyArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    output::header("Copying project");
    execute(&config, &args.source, &args.destination, args.force)?;

    Ok(())
}

/// Copy `source` into `destination` with a spinner
pub(crate) fn execute(
    config: &ReforkConfig,
    source: &Utf8Path,
    destination: &str,
    force: bool,
) -> Result<CopyReport> {
    let options = CopyOptions::from_config(&config.copy, force);

    let spinner = output::spinner("Copying files...");
    let result = copy_project_with_progress(source, destination, &options, |file| {
        spinner.set_message(format!("Copying {}", file));
    });
    spinner.finish_and_clear();

    let report = result?;
    output::success(&format!(
        "Copied {} files to {}",
        report.files_copied, report.destination
    ));

    Ok(report)
}
