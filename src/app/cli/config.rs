//! TOML configuration file loading and settings resolution
//!
//! Settings come from three layers, highest precedence first: the command
//! line, the configuration file, built-in defaults. An explicitly named
//! configuration file must exist; the default one is optional.

use super::args::Args;
use crate::coordinator::DEFAULT_WARMUP;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory under the platform config dir holding the default file
pub const CONFIG_DIR_NAME: &str = "PixelPriority";
pub const CONFIG_FILE_NAME: &str = "pixel-priority.toml";

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: [&str; 3] = ["text", "ext", "json"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// How reports are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Info-level log records
    Log,
    /// `Thread2-PQLEX: [r,g,b]` lines on stdout
    #[default]
    Text,
    /// One JSON object per line on stdout
    Json,
}

/// Contents of the configuration file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub warmup: Option<usize>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
    pub color: Option<bool>,
}

impl FileConfig {
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` (which must exist) or the default file (if present)
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigError::Missing {
                    path: path.to_path_buf(),
                })
            }
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(None),
            },
        };

        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml(&contents, &path).map(Some)
    }
}

/// `<config_dir>/PixelPriority/pixel-priority.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub image: Option<PathBuf>,
    pub warmup: usize,
    pub output: OutputFormat,
    /// Level after applying `-v`/`-q`
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
    /// `None` means auto-detect from the terminal
    pub color: Option<bool>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            image: None,
            warmup: DEFAULT_WARMUP,
            output: OutputFormat::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            log_file: None,
            color: None,
        }
    }
}

impl RunSettings {
    /// Merge command line over file over defaults, then validate
    pub fn resolve(args: &Args, file: Option<FileConfig>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let log_level = args
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or(defaults.log_level);
        validate_choice("log_level", &log_level, &LOG_LEVELS)?;

        let log_format = args
            .log_format
            .clone()
            .or(file.log_format)
            .unwrap_or(defaults.log_format);
        validate_choice("log_format", &log_format, &LOG_FORMATS)?;

        let warmup = args.warmup.or(file.warmup).unwrap_or(defaults.warmup);
        if warmup == 0 {
            return Err(ConfigError::Invalid {
                key: "warmup",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            image: args.image.clone(),
            warmup,
            output: args.output.or(file.output).unwrap_or(defaults.output),
            log_level: crate::core::logging::level_with_verbosity(&log_level, args.verbosity()),
            log_format,
            log_file: args.log_file.clone().or(file.log_file),
            color: args.color_override().or(file.color),
        })
    }

    /// Whether log output should be colored
    pub fn use_color(&self, is_terminal: bool) -> bool {
        self.log_file.is_none() && self.color.unwrap_or(is_terminal)
    }
}

fn validate_choice(key: &'static str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if allowed.contains(&value.to_ascii_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key,
            message: format!("'{}' is not one of {}", value, allowed.join(", ")),
        })
    }
}
