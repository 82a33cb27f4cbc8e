//! spamsurvey - Cross-Wiki Contribution Surveyor
//!
//! Surveys the contribution history of a Wikipedia editor (and optionally a
//! whole category of suspected sockpuppets) across every Wikimedia wiki the
//! accounts have edited, and writes a single wikitext report ready to paste
//! into a cleanup page.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spamsurvey::{Config, SurveyPipeline};
//!
//! let config = Config::default();
//! let summary = SurveyPipeline::new(&config)
//!     .run("Some spammer", None)
//!     .await?;
//! println!("{} fragments written", summary.fragments);
//! ```
//!
//! ## Modules
//!
//! - [`mediawiki`]: Action API sessions, global user info, category
//!   expansion, the contribution surveyor
//! - [`survey`]: run orchestration (user list, wiki set, per-wiki loop)
//! - [`report`]: link rewriting and the report file writer
//! - [`config`]: layered figment configuration

pub mod cli;
pub mod config;
pub mod mediawiki;
pub mod report;
pub mod survey;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{ApiConfig, Config, ConfigLoader, SurveyConfig};

// Error Types
pub use types::{Result, SurveyError};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use survey::{RunSummary, SurveyPipeline};

// =============================================================================
// MediaWiki Re-exports
// =============================================================================

pub use mediawiki::Session;
pub use mediawiki::globaluser::{GlobalUserInfo, WikiAccount};
pub use mediawiki::surveyor::{ApiSurveyor, ContributionSurveyor, SurveyorOptions};

// =============================================================================
// Report Re-exports
// =============================================================================

pub use report::{ReportWriter, rewrite_links, wiki_prefix};
