//! Configuration management for the Fitness Tracker engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FT__)

use anyhow::Result;
use fitness_tracker_shared::validation::validate_water_step;
use fitness_tracker_shared::WATER_STEP_ML;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub user: UserConfig,
}

/// Where preferences and today's totals are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

/// Metric store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub path: PathBuf,
}

/// Tracker behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Amount added or removed per water tap, in ml
    pub water_step_ml: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: bool,
    /// Overrides the default filter when RUST_LOG is unset
    pub filter: Option<String>,
}

/// Signed-in user, as handed over by the auth layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub name: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            name: "guest".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: StoreBackend::File,
                path: PathBuf::from("data/fitness_prefs.json"),
            },
            tracker: TrackerConfig {
                water_step_ml: WATER_STEP_ML,
            },
            logging: LoggingConfig::default(),
            user: UserConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FT__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (FT__ prefix)
            // e.g., FT__TRACKER__WATER_STEP_ML=500 sets tracker.water_step_ml
            .add_source(config::Environment::with_prefix("FT").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the tracker cannot work with
    pub fn validate(&self) -> Result<()> {
        validate_water_step(self.tracker.water_step_ml).map_err(anyhow::Error::msg)?;
        if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
            anyhow::bail!("File store requires a path");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
