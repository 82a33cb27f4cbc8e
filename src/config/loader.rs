//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/spamsurvey/config.toml)
//! 3. Project config (.spamsurvey/config.toml)
//! 4. Environment variables (SPAMSURVEY_* prefix, `__` between sections)
//! 5. Explicit `--config` file (most specific source)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{Result, SurveyError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain. An explicit file
    /// (from `--config`) merges last and must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // e.g. SPAMSURVEY_HOME_WIKI -> home_wiki, SPAMSURVEY_API__TIMEOUT_SECS
        // -> api.timeout_secs
        figment = figment.merge(Env::prefixed("SPAMSURVEY_").split("__").lowercase(true));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SurveyError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading explicit config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        let config: Config = figment
            .extract()
            .map_err(|e| SurveyError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/spamsurvey/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("spamsurvey"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(".spamsurvey/config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_paths() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show the effective configuration after the full resolution chain
    pub fn show_config(explicit: Option<&Path>) -> Result<()> {
        let config = Self::load(explicit)?;
        println!(
            "{}",
            toml::to_string_pretty(&config).map_err(|e| SurveyError::Config(e.to_string()))?
        );
        Ok(())
    }
}
