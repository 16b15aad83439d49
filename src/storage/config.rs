//! Application configuration.
//!
//! Stored as TOML in the platform data directory. A missing file yields
//! defaults; a malformed one is an error.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::metrics::pace::{ThresholdPace, DEFAULT_THRESHOLD_PACE};

/// Hard bounds on series repetitions. Configured bounds narrow these.
pub const MIN_REPETITIONS: u32 = 1;
pub const MAX_REPETITIONS: u32 = 50;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Plan editing settings
    #[serde(default)]
    pub plan: PlanSettings,
    /// Snapshot export settings
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            plan: PlanSettings::default(),
            export: ExportSettings::default(),
        }
    }
}

/// Plan editing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Threshold pace as `m:ss` per kilometer
    pub threshold_pace: String,
    /// Name offered when grouping a selection
    pub default_group_name: String,
    /// Appended to the name of duplicated items and groups
    pub copy_suffix: String,
    /// Fewest repetitions a series accepts
    pub min_repetitions: u32,
    /// Most repetitions a series accepts
    pub max_repetitions: u32,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            threshold_pace: DEFAULT_THRESHOLD_PACE.to_string(),
            default_group_name: "Nuevo Grupo".to_string(),
            copy_suffix: " (copia)".to_string(),
            min_repetitions: MIN_REPETITIONS,
            max_repetitions: MAX_REPETITIONS,
        }
    }
}

impl PlanSettings {
    /// Configured threshold pace, falling back to the default when invalid.
    pub fn threshold(&self) -> ThresholdPace {
        match self.threshold_pace.parse() {
            Ok(pace) => pace,
            Err(e) => {
                tracing::warn!("Ignoring configured threshold pace: {}", e);
                ThresholdPace::default()
            }
        }
    }

    /// Accepted repetitions: the configured range clamped to
    /// `MIN_REPETITIONS..=MAX_REPETITIONS`.
    pub fn repetition_range(&self) -> RangeInclusive<u32> {
        self.min_repetitions.max(MIN_REPETITIONS)..=self.max_repetitions.min(MAX_REPETITIONS)
    }
}

/// Snapshot export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Indent exported JSON
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "runplan", "RunPlan")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load application configuration from `path`.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Some(parent) = path.parent() {
        config.data_dir = parent.to_path_buf();
    }

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save application configuration to `path`.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content = toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    tracing::info!("Saved config to {}", path.display());
    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
