//! Survey Command
//!
//! Loads configuration, applies CLI overrides, and drives the survey
//! pipeline on a fresh Tokio runtime.

use std::path::Path;

use console::style;
use tokio::runtime::Runtime;

use crate::config::ConfigLoader;
use crate::survey::SurveyPipeline;
use crate::types::Result;

pub fn run(
    username: &str,
    category: Option<&str>,
    output: Option<&Path>,
    config_file: Option<&Path>,
) -> Result<()> {
    let mut config = ConfigLoader::load(config_file)?;
    if let Some(output) = output {
        config.output = output.to_path_buf();
    }

    let rt = Runtime::new()?;
    let summary = rt.block_on(SurveyPipeline::new(&config).run(username, category))?;

    println!();
    println!(
        "{} Surveyed {} user(s) across {} wiki(s)",
        style("✓").green(),
        summary.users,
        summary.wikis
    );
    println!(
        "{} {} page fragment(s) written to {}",
        style("✓").green(),
        summary.fragments,
        summary.output.display()
    );

    Ok(())
}
