//! # Configuration
//!
//! Optional TOML configuration for the Orrery binary. Everything has a
//! sensible default; command-line arguments always win over the file.

use orrery_core::OrreryError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "orrery.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// Default snapshot file used when a command omits its argument.
    pub snapshot: Option<PathBuf>,
    /// Log format: "text" (default) or "json". The ORRERY_LOG_FORMAT
    /// environment variable overrides this.
    pub log_format: Option<String>,
}

impl OrreryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, OrreryError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OrreryError::IoError(format!("Read config '{}': {}", path.display(), e)))?;
        toml::from_str(&contents)
            .map_err(|e| OrreryError::InvalidSnapshot(format!("Config: {}", e)))
    }

    /// Load the configuration the binary should run with: the explicit
    /// `--config` path if given (missing file is an error), otherwise
    /// `orrery.toml` if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, OrreryError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
