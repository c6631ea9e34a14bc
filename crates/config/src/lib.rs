//! Configuration management for the collection call simulator
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (COLLECTION_SIM_ prefix)
//!
//! Scenario scripts are YAML too: a built-in catalog is embedded in the
//! crate and a replacement catalog can be loaded from disk.

pub mod scenarios;
pub mod settings;

pub use scenarios::{QuickReply, Scenario, ScenarioCatalog, QUICK_REPLIES};
pub use settings::{load_settings, ObservabilityConfig, Settings, SimulationConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Duplicate scenario key: {0}")]
    DuplicateScenario(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
