//! Configuration System
//!
//! Layered configuration with clear precedence:
//! CLI arguments > environment > project config > global config > defaults

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{ApiConfig, Config, SurveyConfig};
