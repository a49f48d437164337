//! Configuration management for mdtoc

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Config files looked up in the working directory, in priority order
pub const LOCAL_CONFIG_FILES: [&str; 3] = [".tocrc", ".tocrc.json", ".tocrc.toml"];

pub const DEFAULT_START_MARKER: &str = "<!-- toc -->";
pub const DEFAULT_END_MARKER: &str = "<!-- tocstop -->";
pub const DEFAULT_MAX_LEVEL: u8 = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocStyle {
    /// All entries on one line, joined by a bullet
    #[default]
    Horizontal,
    /// One entry per line, indented by heading level
    Vertical,
}

impl TocStyle {
    fn as_str(&self) -> &'static str {
        match self {
            TocStyle::Horizontal => "horizontal",
            TocStyle::Vertical => "vertical",
        }
    }
}

impl fmt::Display for TocStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TocStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(TocStyle::Horizontal),
            "vertical" => Ok(TocStyle::Vertical),
            other => Err(ConfigError::UnknownStyle(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(ConfigError::UnknownLogLevel(other.to_string())),
        }
    }
}

/// The sentinel lines delimiting the generated region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl Default for MarkerPair {
    fn default() -> Self {
        Self {
            start: DEFAULT_START_MARKER.to_string(),
            end: DEFAULT_END_MARKER.to_string(),
        }
    }
}

impl MarkerPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Escaped forms (`\` + marker) that opt a line out of detection
    pub fn escaped(&self) -> (String, String) {
        (format!("\\{}", self.start), format!("\\{}", self.end))
    }
}

/// Settings for rendering a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub style: TocStyle,
    #[serde(alias = "maxLevel")]
    pub max_level: u8,
    #[serde(alias = "autoInsert")]
    pub auto_insert: bool,
    pub markers: MarkerPair,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            style: TocStyle::default(),
            max_level: DEFAULT_MAX_LEVEL,
            auto_insert: false,
            markers: MarkerPair::default(),
        }
    }
}

/// Marker overrides; unset fields fall back to the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerOverrides {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A partial configuration as found in a config file or on the command line.
///
/// Every field is optional so that several sources can be layered with
/// [`FileConfig::merge`] before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub style: Option<TocStyle>,
    #[serde(alias = "maxLevel")]
    pub max_level: Option<u8>,
    #[serde(alias = "autoInsert")]
    pub auto_insert: Option<bool>,
    pub watch: Option<bool>,
    #[serde(alias = "logLevel")]
    pub log_level: Option<LogLevel>,
    pub markers: MarkerOverrides,
    pub files: Vec<String>,
}

impl FileConfig {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdtoc")
            .map(|proj_dirs| proj_dirs.config_dir().join("mdtoc.toml"))
    }

    /// Find the config file to use: a local `.tocrc*` in `dir`, else the
    /// platform config file if it exists
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        LOCAL_CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .or_else(|| Self::config_path().filter(|path| path.is_file()))
    }

    /// Load configuration from an explicit path, or from the discovered file.
    /// Returns defaults (and no path) when nothing is found.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(path) => Some(dir.join(path)),
            None => Self::discover(dir),
        };

        match path {
            Some(path) => {
                let config = Self::load_from(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Load from a specific path. `.json` files and `.tocrc` files that start
    /// with `{` are parsed as JSON, everything else as TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path.extension().is_some_and(|ext| ext == "json")
            || content.trim_start().starts_with('{');

        let config: FileConfig = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        };

        Ok(config)
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    /// `files` from `other` replace ours only when non-empty.
    pub fn merge(self, other: FileConfig) -> FileConfig {
        FileConfig {
            style: other.style.or(self.style),
            max_level: other.max_level.or(self.max_level),
            auto_insert: other.auto_insert.or(self.auto_insert),
            watch: other.watch.or(self.watch),
            log_level: other.log_level.or(self.log_level),
            markers: MarkerOverrides {
                start: other.markers.start.or(self.markers.start),
                end: other.markers.end.or(self.markers.end),
            },
            files: if other.files.is_empty() {
                self.files
            } else {
                other.files
            },
        }
    }

    /// Apply defaults and produce the per-document settings
    pub fn toc_config(&self) -> Result<TocConfig, ConfigError> {
        let defaults = MarkerPair::default();
        let markers = MarkerPair {
            start: self.markers.start.clone().unwrap_or(defaults.start),
            end: self.markers.end.clone().unwrap_or(defaults.end),
        };

        if markers.start.trim().is_empty() || markers.end.trim().is_empty() {
            return Err(ConfigError::EmptyMarker);
        }

        Ok(TocConfig {
            style: self.style.unwrap_or_default(),
            max_level: self.max_level.unwrap_or(DEFAULT_MAX_LEVEL),
            auto_insert: self.auto_insert.unwrap_or(false),
            markers,
        })
    }

    pub fn watch(&self) -> bool {
        self.watch.unwrap_or(false)
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}
