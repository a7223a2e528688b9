//! TOML-based extraction configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::select::ReductionMode;

/// Default simulation output log name.
pub const DEFAULT_INPUT: &str = "eplusout.eso";

/// Extraction settings parsed from TOML.
///
/// All fields have defaults, so an empty file is valid. Command-line flags
/// override whatever is loaded here. Leaving `key` or `mode` unset means the
/// caller is prompted for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Output log to read.
    pub input: PathBuf,
    /// Directory the hourly CSV is written into.
    pub output_dir: PathBuf,
    /// Explicit output file; overrides the name derived from the variable.
    pub output: Option<PathBuf>,
    /// Dictionary key of the variable to extract.
    pub key: Option<String>,
    /// Reduction mode: `"sum"`/`"s"` or `"average"`/`"a"`.
    pub mode: Option<ReductionMode>,
    /// Convert per-timestep energy in J to mean power in W before reduction.
    pub joules_to_watts: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            output: None,
            key: None,
            mode: None,
            joules_to_watts: false,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Field name (e.g., `"input"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ExtractConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.input.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "input".into(),
                message: "must not be empty".into(),
            });
        }
        if self.output_dir.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "output_dir".into(),
                message: "must not be empty".into(),
            });
        }
        if let Some(ref output) = self.output {
            if output.file_name().is_none() {
                errors.push(ConfigError {
                    field: "output".into(),
                    message: format!("\"{}\" does not name a file", output.display()),
                });
            }
        }
        if let Some(ref key) = self.key {
            if key.trim().is_empty() {
                errors.push(ConfigError {
                    field: "key".into(),
                    message: "must not be blank".into(),
                });
            }
        }

        errors
    }
}
