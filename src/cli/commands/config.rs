//! Config Command
//!
//! Prints the effective configuration or the file paths it is read from.

use std::path::Path;

use crate::config::ConfigLoader;
use crate::types::Result;

/// Show the merged configuration from all sources.
pub fn show(config_file: Option<&Path>) -> Result<()> {
    ConfigLoader::show_config(config_file)
}

/// Show configuration file paths and whether each exists.
pub fn paths() -> Result<()> {
    ConfigLoader::show_paths();
    Ok(())
}
