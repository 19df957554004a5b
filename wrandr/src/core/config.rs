use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wrandr_ipc::OutputFormat;

use super::{ConfigError, CoordinateMapper, SnapEngine, DEFAULT_DENSITY, DEFAULT_SNAP_TOLERANCE};

/// Application configuration settings.
/// Read from `config.json` in the user config directory; every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// World pixels per map unit
    pub density: i32,
    /// Snap distance in map units
    pub snap_tolerance: i32,
    /// Dialect used when sending commands to swaymsg
    pub apply_format: OutputFormat,
    /// Dialect used by `export` when none is requested
    pub export_format: OutputFormat,
    /// Program invoked to query and configure outputs
    pub swaymsg: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            apply_format: OutputFormat::Swaymsg,
            export_format: OutputFormat::Kanshi,
            swaymsg: "swaymsg".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wrandr").join("config.json"))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("No config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.density < 1 {
            return Err(ConfigError::Invalid(format!(
                "density must be at least 1 (got {})",
                self.density
            )));
        }
        if self.snap_tolerance < 0 {
            return Err(ConfigError::Invalid(format!(
                "snap_tolerance must not be negative (got {})",
                self.snap_tolerance
            )));
        }
        if self.apply_format == OutputFormat::Kanshi {
            return Err(ConfigError::Invalid(
                "apply_format cannot be kanshi (swaymsg does not accept X,Y positions)"
                    .to_string(),
            ));
        }
        if self.swaymsg.trim().is_empty() {
            return Err(ConfigError::Invalid("swaymsg must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.density)
    }

    pub fn snap_engine(&self) -> SnapEngine {
        SnapEngine::new(self.mapper(), self.snap_tolerance)
    }
}
