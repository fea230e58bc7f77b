//! Configuration types for the ranking engine.
//!
//! Every value has a built-in default. An optional `medishare.toml` can
//! override any subset:
//!
//! ```toml
//! [urgency]
//! critical_days = 7
//! critical_priority = 100
//!
//! [matching]
//! max_results = 5
//!
//! [dashboard]
//! urgent_limit = 5
//! expiring_window_days = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AppError;

/// Default config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "medishare.toml";

/// Upper bound for `dashboard.expiring_window_days` (one hundred years).
pub const MAX_EXPIRING_WINDOW_DAYS: i64 = 36_500;

/// Day thresholds and the priority assigned to each urgency band.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UrgencyConfig {
    pub critical_days: i64,
    pub high_days: i64,
    pub medium_days: i64,
    pub critical_priority: u32,
    pub high_priority: u32,
    pub medium_priority: u32,
    pub low_priority: u32,
}

impl Default for UrgencyConfig {
    fn default() -> Self {
        Self {
            critical_days: 7,
            high_days: 30,
            medium_days: 90,
            critical_priority: 100,
            high_priority: 50,
            medium_priority: 25,
            low_priority: 10,
        }
    }
}

impl UrgencyConfig {
    /// Checks that the bands are ordered: thresholds strictly increasing and
    /// priorities non-increasing from critical to low.
    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.critical_days < self.high_days && self.high_days < self.medium_days) {
            return Err(AppError::ConfigError(format!(
                "urgency day thresholds must increase: {} < {} < {}",
                self.critical_days, self.high_days, self.medium_days
            )));
        }
        if !(self.critical_priority >= self.high_priority
            && self.high_priority >= self.medium_priority
            && self.medium_priority >= self.low_priority)
        {
            return Err(AppError::ConfigError(
                "urgency priorities must not increase as expiry gets further away".to_string(),
            ));
        }
        Ok(())
    }
}

/// Candidate matcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub max_results: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_results: 5 }
    }
}

/// Limits used by the dashboard-style listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub urgent_limit: usize,
    pub expiring_window_days: i64,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(0..=MAX_EXPIRING_WINDOW_DAYS).contains(&self.expiring_window_days) {
            return Err(AppError::ConfigError(format!(
                "dashboard.expiring_window_days must be between 0 and {}, got {}",
                MAX_EXPIRING_WINDOW_DAYS, self.expiring_window_days
            )));
        }
        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            urgent_limit: 5,
            expiring_window_days: 30,
        }
    }
}

/// Root of `medishare.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub urgency: UrgencyConfig,
    pub matching: MatchConfig,
    pub dashboard: DashboardConfig,
}

/// Returns `<config dir>/medishare/medishare.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("medishare").join(CONFIG_FILE_NAME))
}

/// Loads the engine configuration.
///
/// With `path == None` the default location is tried. A missing file is not
/// an error and yields [`EngineConfig::default`]; a file that exists but
/// fails to parse or validate is.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return Ok(EngineConfig::default()),
    };

    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: EngineConfig = toml::from_str(&content)?;
    config.urgency.validate()?;
    config.dashboard.validate()?;

    if config.matching.max_results == 0 {
        return Err(AppError::ConfigError(
            "matching.max_results must be at least 1".to_string(),
        ));
    }

    debug!("Loaded config from {}", path.display());
    Ok(config)
}
