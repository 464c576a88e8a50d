//! Tracker configuration management

use anyhow::{anyhow, bail, Context, Result};
use club_stats::{ReportOrder, ScoringRules};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "club-tracker.toml";

/// Main tracker configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Input and output locations
    pub data: DataSettings,

    /// Clubs processed by `run`
    pub clubs: Vec<ClubConfig>,

    /// Scoring constants shared by every club
    pub scoring: ScoringRules,

    /// Player report settings
    pub report: ReportSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Data location settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory containing one folder per club
    pub data_dir: PathBuf,

    /// File name fragments skipped in weekly data directories
    pub ignore: Vec<String>,
}

/// One club and the folder holding its data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubConfig {
    pub name: String,
    pub folder: String,
}

impl ClubConfig {
    pub fn new(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self { name: name.into(), folder: folder.into() }
    }
}

/// Player report settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Row ordering (team, average)
    pub order: ReportOrder,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (pretty, json, compact)
    pub format: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            ignore: club_data::reader::DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "pretty".to_string() }
    }
}

impl TrackerConfig {
    /// Clubs used when the configuration names none
    pub fn default_clubs() -> Vec<ClubConfig> {
        vec![
            ClubConfig::new("new_eden", "01_new_eden"),
            ClubConfig::new("edens_gate", "02_edens_gate"),
        ]
    }

    pub fn club(&self, name: &str) -> Option<&ClubConfig> {
        self.clubs.iter().find(|club| club.name == name)
    }

    /// Club by name, or an error listing the configured names
    pub fn require_club(&self, name: &str) -> Result<&ClubConfig> {
        self.club(name).ok_or_else(|| {
            let known: Vec<&str> = self.clubs.iter().map(|club| club.name.as_str()).collect();
            anyhow!("Unknown club '{}' (configured: {})", name, known.join(", "))
        })
    }
}

/// Load configuration from file, environment and command line overrides
///
/// An explicit `path` must exist. Without one, `club-tracker.toml` in the
/// working directory is used when present.
pub fn load_config(path: Option<&Path>, data_dir: Option<&Path>) -> Result<TrackerConfig> {
    let mut config = match path {
        Some(path) => load_from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_from_file(default_path)?
            } else {
                TrackerConfig::default()
            }
        }
    };

    // Override with environment variables
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    if let Some(data_dir) = data_dir {
        config.data.data_dir = data_dir.to_path_buf();
    }

    if config.clubs.is_empty() {
        config.clubs = TrackerConfig::default_clubs();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML file
pub fn load_from_file(path: &Path) -> Result<TrackerConfig> {
    tracing::debug!("Loading configuration from file: {:?}", path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {:?}", path))?;
    parse_config(&content).with_context(|| format!("Invalid configuration file: {:?}", path))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<TrackerConfig> {
    let config: TrackerConfig = toml::from_str(content)?;
    Ok(config)
}

/// Apply `CLUB_TRACKER_*` overrides using the given variable lookup
pub fn apply_env_overrides(config: &mut TrackerConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(data_dir) = lookup("CLUB_TRACKER_DATA_DIR") {
        config.data.data_dir = PathBuf::from(data_dir);
    }

    if let Some(level) = lookup("CLUB_TRACKER_LOG_LEVEL") {
        config.logging.level = level;
    }

    if let Some(format) = lookup("CLUB_TRACKER_LOG_FORMAT") {
        config.logging.format = format;
    }
}

/// Validate configuration
pub fn validate_config(config: &TrackerConfig) -> Result<()> {
    // Validate log level
    match config.logging.level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => bail!("Invalid log level: {}", config.logging.level),
    }

    // Validate log format
    match config.logging.format.as_str() {
        "json" | "pretty" | "compact" => {}
        _ => bail!("Invalid log format: {}", config.logging.format),
    }

    if config.clubs.is_empty() {
        bail!("No clubs configured");
    }

    let mut names = HashSet::new();
    let mut folders = HashSet::new();
    for club in &config.clubs {
        if club.name.trim().is_empty() || club.folder.trim().is_empty() {
            bail!("Club entries need a name and a folder: {:?}", club);
        }
        if !names.insert(club.name.as_str()) {
            bail!("Club configured twice: {}", club.name);
        }
        if !folders.insert(club.folder.trim()) {
            bail!("Club folder configured twice: {}", club.folder);
        }
    }

    config.scoring.validate().map_err(|reason| anyhow!("Invalid scoring rules: {}", reason))?;

    Ok(())
}
