//! Replace command

use anyhow::Result;
use camino::Utf8Path;
use refork_core::config::ReforkConfig;
use refork_core::replacer::{replace_symbols, ReplaceOptions};
use refork_core::types::ReplaceReport;

use crate::cli::ReplaceArgs;
use crate::output;

pub fn run(args: ReplaceArgs, config_path: Option<&Utf8Path>) -> Result<()> {
    let config = super::load_config(config_path)?;

    output::header("Replacing symbols");
    execute(
        &config,
        &args.destination,
        &args.project_name,
        args.organization.as_deref(),
    )?;

    Ok(())
}

/// Rewrite template symbols under `destination`
pub(crate) fn execute(
    config: &ReforkConfig,
    destination: &str,
    project_name: &str,
    organization: Option<&str>,
) -> Result<ReplaceReport> {
    let options = ReplaceOptions::from_config(config, project_name, organization);
    output::kv("Project", &options.project_name);
    output::kv("Organization", &options.organization);

    let report = replace_symbols(destination, &options)?;

    for file in &report.files_updated {
        output::kv("Updated", file.as_str());
    }

    if report.updated_count() == 0 {
        output::info(&format!(
            "Nothing to replace ({} files scanned)",
            report.files_scanned
        ));
    } else {
        output::success(&format!(
            "Updated {} of {} files",
            report.updated_count(),
            report.files_scanned
        ));
    }

    Ok(report)
}
