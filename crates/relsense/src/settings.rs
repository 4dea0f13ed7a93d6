//! User settings stored in `<data_dir>/config.yaml`
//!
//! Example:
//! ```yaml
//! out_dir: outputs
//! eps: 0.02
//! sweep_1d: { low: 0.0, high: 0.5, steps: 101 }
//! sweep_3d: { low: 0.05, high: 0.40, steps: 16 }
//! default_dimension: Emotional connection
//! default_triple: [Emotional connection, Communication, Fun]
//! ```
//!
//! Every field is optional. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use relsense_core::SweepRange;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "config.yaml";

#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "IO error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SettingsError::Invalid(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Export directory, relative to the working directory unless absolute
    pub out_dir: PathBuf,
    pub sweep_1d: SweepRange,
    pub sweep_3d: SweepRange,
    /// Boundary tolerance on `|diff|`
    pub eps: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_dimension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_triple: Option<[String; 3]>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("outputs"),
            sweep_1d: SweepRange::default_1d(),
            sweep_3d: SweepRange::default_3d(),
            eps: 0.02,
            default_dimension: None,
            default_triple: None,
        }
    }
}

impl Settings {
    /// `~/.relsense/`, or `./.relsense/` without a home directory
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".relsense")
    }

    pub fn config_path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE_NAME)
    }

    /// Load settings from `data_dir`, falling back to defaults when no file exists
    pub fn load(data_dir: &Path) -> Result<Self, SettingsError> {
        let path = Self::config_path(data_dir);
        if !path.exists() {
            tracing::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| SettingsError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        let settings = Self::from_yaml(&content)?;

        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self =
            serde_saphyr::from_str(yaml).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        serde_saphyr::to_string(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.sweep_1d
            .validate()
            .map_err(|e| SettingsError::Invalid(format!("sweep_1d: {}", e)))?;
        self.sweep_3d
            .validate()
            .map_err(|e| SettingsError::Invalid(format!("sweep_3d: {}", e)))?;
        validate_eps(self.eps)
    }
}

/// Boundary tolerance must be finite and non-negative, wherever it comes from
pub fn validate_eps(eps: f64) -> Result<(), SettingsError> {
    if !eps.is_finite() || eps < 0.0 {
        return Err(SettingsError::Invalid(format!(
            "eps must be a non-negative number, got {}",
            eps
        )));
    }
    Ok(())
}
