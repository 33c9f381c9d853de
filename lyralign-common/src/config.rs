//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest)
//! 2. Environment variable (bound to the CLI layer)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The CLI layer owns steps 1-2; this module owns the TOML file and the
//! compiled defaults. A missing config file is normal and falls through to
//! defaults; a malformed one is a configuration error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming an explicit config file location
pub const CONFIG_PATH_ENV: &str = "LYRALIGN_CONFIG";

/// Configuration loaded from the TOML file
///
/// Every field has a compiled default, so an empty file and a missing file
/// behave identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Speech-recognition model size name (tiny, base, small, medium, large)
    #[serde(default = "default_model")]
    pub model: String,

    /// Directory holding GGML model files
    ///
    /// If not specified, the platform data directory is used.
    #[serde(default)]
    pub models_dir: Option<PathBuf>,

    /// Language hint for the recognizer (absent = auto-detect)
    #[serde(default)]
    pub language: Option<String>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            models_dir: None,
            language: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_model() -> String {
    "base".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Load configuration from the resolved config file location.
    ///
    /// `LYRALIGN_CONFIG` overrides the platform default location; an
    /// explicitly named file must exist and parse. The default location is
    /// allowed to be absent.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
            })?;
            return Self::parse(&contents, &path);
        }

        let Some(path) = config_file_path() else {
            debug!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents, &path),
            Err(_) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn parse(contents: &str, path: &std::path::Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

/// Default configuration file path for the platform
///
/// `~/.config/lyralign/config.toml` on Linux, the platform equivalent
/// elsewhere.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lyralign").join("config.toml"))
}

/// Default directory for GGML model files
pub fn default_models_dir() -> PathBuf {
    if cfg!(target_os = "macos") {
        // ~/Library/Application Support/lyralign/models
        dirs::data_dir()
            .map(|d| d.join("lyralign").join("models"))
            .unwrap_or_else(|| PathBuf::from("./lyralign_models"))
    } else {
        // ~/.local/share/lyralign/models on Linux, %LOCALAPPDATA%\lyralign\models on Windows
        dirs::data_local_dir()
            .map(|d| d.join("lyralign").join("models"))
            .unwrap_or_else(|| PathBuf::from("./lyralign_models"))
    }
}
