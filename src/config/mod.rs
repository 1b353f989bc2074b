//! Application Configuration
//!
//! Structuring thresholds, name filtering and output settings stored in TOML format.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MenuError, Result};

/// Section headers that are never reported as dishes
pub const DEFAULT_DENYLIST: [&str; 6] = ["SALAD", "SIDES", "DRINKS", "NEW!", "RICE BOWL", "EXTRAS"];

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Line clustering and anchor matching
    pub structuring: StructuringConfig,
    /// Downstream dish-name filter
    pub filter: FilterConfig,
    /// CLI output
    pub output: OutputConfig,
}

impl AppConfig {
    /// Check every section for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        self.structuring.validate()?;
        self.filter.validate()
    }
}

/// Menu structuring thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuringConfig {
    /// A token joins the current line when overlap / token height exceeds this (0.0 - 1.0)
    pub line_overlap_threshold: f64,
    /// Maximum vertical distance (pixels, exclusive) between a price and its dish name
    pub max_anchor_distance: f64,
    /// Shortest dish name kept, in characters
    pub min_name_len: usize,
    /// Bare price tokens must be shorter than this, in characters
    pub max_price_len: usize,
    /// Exact names (case-sensitive) that are never dishes
    pub denylist: Vec<String>,
}

impl Default for StructuringConfig {
    fn default() -> Self {
        Self {
            line_overlap_threshold: 0.4,
            max_anchor_distance: 120.0,
            min_name_len: 3,
            max_price_len: 8,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StructuringConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.line_overlap_threshold) {
            return Err(MenuError::InvalidConfig(format!(
                "line_overlap_threshold must be within 0.0..=1.0, got {}",
                self.line_overlap_threshold
            )));
        }
        if !self.max_anchor_distance.is_finite() || self.max_anchor_distance < 0.0 {
            return Err(MenuError::InvalidConfig(format!(
                "max_anchor_distance must be a non-negative number, got {}",
                self.max_anchor_distance
            )));
        }
        Ok(())
    }
}

/// Dish-name filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Apply the filter after structuring
    pub enabled: bool,
    /// Generic words rejected on exact (lowercase) match
    pub ignore_words: Vec<String>,
    /// Address fragments rejected on substring (lowercase) match
    pub address_keywords: Vec<String>,
    /// Names with a larger share of digits are rejected (0.0 - 1.0)
    pub max_digit_ratio: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignore_words: [
                "menu", "hours", "open", "closed", "phone", "address", "monday", "tuesday",
                "wednesday", "thursday", "friday", "saturday", "sunday", "website", "email",
                "contact",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            address_keywords: [
                "st.", "street", "ave", "avenue", "rd", "road", "blvd", "boulevard", "dr",
                "drive", "city", "zip",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_digit_ratio: 0.5,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_digit_ratio) {
            return Err(MenuError::InvalidConfig(format!(
                "max_digit_ratio must be within 0.0..=1.0, got {}",
                self.max_digit_ratio
            )));
        }
        Ok(())
    }
}

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Full JSON report
    #[default]
    Json,
    /// One dish name per line
    Text,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
        }
    }
}

/// Get the configuration directory
pub fn config_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "menusnap", "MenuSnap")
        .ok_or_else(|| MenuError::InvalidConfig("could not determine config directory".to_string()))?;

    Ok(proj_dirs.config_dir().to_path_buf())
}

/// Default location of the configuration file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| MenuError::InvalidConfig(format!("failed to serialize config: {e}")))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
