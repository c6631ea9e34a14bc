//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ConfigError;

/// Upper bound for the borrower history window
const MAX_HISTORY_WINDOW: usize = 20;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Simulation behaviour
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Scenario started when none is requested explicitly
    #[serde(default = "default_scenario")]
    pub default_scenario: String,

    /// Seed for reply composition; entropy when unset
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Number of most recent borrower messages the intent classifier reads
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Optional YAML file replacing the built-in scenario catalog
    #[serde(default)]
    pub scenario_file: Option<String>,
}

fn default_scenario() -> String {
    "job_loss".to_string()
}

fn default_history_window() -> usize {
    3
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_scenario: default_scenario(),
            rng_seed: None,
            history_window: default_history_window(),
            scenario_file: None,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_simulation()?;
        self.validate_observability()?;
        Ok(())
    }

    fn validate_simulation(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;

        if sim.history_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.history_window".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if sim.history_window > MAX_HISTORY_WINDOW {
            return Err(ConfigError::InvalidValue {
                field: "simulation.history_window".to_string(),
                message: format!(
                    "Must be at most {}, got {}",
                    MAX_HISTORY_WINDOW, sim.history_window
                ),
            });
        }

        if sim.default_scenario.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "simulation.default_scenario".to_string(),
                message: "Cannot be empty".to_string(),
            });
        }

        if let Some(path) = &sim.scenario_file {
            if !Path::new(path).exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
        }

        Ok(())
    }

    fn validate_observability(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Must be one of {}, got {}",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/` and the environment
///
/// Priority: env vars > config/{env}.* > config/default.* > defaults.
/// Environment variables use the `COLLECTION_SIM` prefix with `__` between
/// path segments, e.g. `COLLECTION_SIM__SIMULATION__RNG_SEED=7`.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit configuration directory
pub fn load_settings_from(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder =
            builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("COLLECTION_SIM")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        config_dir = %config_dir.display(),
        env = env.unwrap_or("default"),
        "Settings loaded"
    );

    Ok(settings)
}
