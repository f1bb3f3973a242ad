//! Command implementations

pub mod all;
pub mod copy;
pub mod init;
pub mod replace;

use anyhow::{Context, Result};
use camino::Utf8Path;
use refork_core::config::{ConfigLoader, ReforkConfig};

/// Load the effective configuration, honoring `--config`
pub(crate) fn load_config(path: Option<&Utf8Path>) -> Result<ReforkConfig> {
    ConfigLoader::new()
        .load(path)
        .context("Failed to load configuration")
}
