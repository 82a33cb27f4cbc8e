//! Configuration Types
//!
//! All configuration structures with sensible defaults. Supports global
//! (~/.config/spamsurvey/) and project (.spamsurvey/) level configuration.
//! Comingle and new-only are not configurable: the survey always merges all
//! surveyed users into one listing and reports page creations only.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wiki the survey is anchored to: always part of the wiki set, and the
    /// wiki that answers category and global-user-info queries.
    pub home_wiki: String,

    /// Report path, relative to the working directory unless absolute.
    pub output: PathBuf,

    /// MediaWiki API client settings
    pub api: ApiConfig,

    /// Survey scope settings
    pub survey: SurveyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_wiki: "en.wikipedia.org".to_string(),
            output: PathBuf::from("spam.txt"),
            api: ApiConfig::default(),
            survey: SurveyConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `SurveyError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.home_wiki.is_empty() {
            return Err(crate::types::SurveyError::Config(
                "home_wiki must not be empty".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(crate::types::SurveyError::Config(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(1..=500).contains(&self.api.page_limit) {
            return Err(crate::types::SurveyError::Config(format!(
                "api.page_limit must be between 1 and 500, got {}",
                self.api.page_limit
            )));
        }

        Ok(())
    }
}

// =============================================================================
// API Client Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// User-Agent header. Wikimedia API etiquette wants a descriptive one.
    pub user_agent: String,

    /// Path of the Action API endpoint on every surveyed wiki.
    pub path: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Items per listing request (anonymous API maximum is 500)
    pub page_limit: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "spamsurvey/{} (cross-wiki contribution surveyor)",
                env!("CARGO_PKG_VERSION")
            ),
            path: "/w/api.php".to_string(),
            timeout_secs: 30,
            page_limit: 500,
        }
    }
}

// =============================================================================
// Survey Scope Configuration
// =============================================================================

/// The three surveyor sub-options, all off by default. `namespace` restricts
/// which page creations count; 0 is the main/article namespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Namespace surveyed for page creations
    pub namespace: i32,

    /// Only creations that are still the page's latest revision
    pub top_only: bool,

    /// Drop creations flagged as minor edits
    pub skip_minor: bool,

    /// List oldest creations first instead of newest first
    pub oldest_first: bool,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            namespace: 0,
            top_only: false,
            skip_minor: false,
            oldest_first: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.home_wiki, "en.wikipedia.org");
        assert_eq!(config.output, PathBuf::from("spam.txt"));
        assert_eq!(config.survey.namespace, 0);
        assert!(!config.survey.top_only);
        assert!(!config.survey.skip_minor);
        assert!(!config.survey.oldest_first);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_page_limit() {
        let mut config = Config::default();
        config.api.page_limit = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_home_wiki() {
        let mut config = Config::default();
        config.home_wiki = String::new();
        assert!(config.validate().is_err());
    }
}
