//! Settings loading from files and environment variables

use crate::settings::{PopulationMode, ResourceSettings};
use msgres_common::ResourceError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_VAR: &str = "MSGRES_CONFIG_PATH";

/// Settings files looked up in the working directory, in order
pub const DEFAULT_CONFIG_FILES: [&str; 3] = ["msgres.yaml", "msgres.yml", "msgres.toml"];

/// Settings loading errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error when reading the settings file
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML settings: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML settings: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Settings validation error
    #[error("Settings validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Why the value was rejected
        message: String,
    },

    /// File extension is neither YAML nor TOML
    #[error("Unsupported settings format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

impl From<SettingsError> for ResourceError {
    fn from(err: SettingsError) -> Self {
        Self::config_with_source("failed to load resource settings", err)
    }
}

/// Loads [`ResourceSettings`] from disk and the environment
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from a YAML or TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ResourceSettings, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let mut settings: ResourceSettings = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => return Err(SettingsError::UnsupportedFormat(path.to_path_buf())),
        };

        Self::apply_overrides(&mut settings, |var| env::var(var).ok())?;
        settings.validate_all()?;

        debug!("Loaded resource settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `MSGRES_CONFIG_PATH`, a settings file in the working
    /// directory, or defaults, in that order
    pub fn load() -> msgres_common::Result<ResourceSettings> {
        if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            return Ok(Self::load_config(config_path)?);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
        {
            return Ok(Self::load_config(path)?);
        }

        info!("No settings file found, using defaults");
        let mut settings = ResourceSettings::default();
        Self::apply_overrides(&mut settings, |var| env::var(var).ok())?;
        settings.validate_all().map_err(SettingsError::from)?;
        Ok(settings)
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> msgres_common::Result<ResourceSettings> {
        Ok(Self::load_config(path)?)
    }

    /// Apply `MSGRES_*` overrides read through `lookup`
    pub fn apply_overrides<F>(
        settings: &mut ResourceSettings,
        lookup: F,
    ) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(directory) = lookup("MSGRES_DIRECTORY") {
            settings.directory = PathBuf::from(directory);
        }

        if let Some(file_name) = lookup("MSGRES_FILE_NAME") {
            settings.file_name = file_name;
        }

        if let Some(locale) = lookup("MSGRES_DEFAULT_LOCALE") {
            settings.default_locale = Some(locale);
        }

        if let Some(locales) = lookup("MSGRES_LOCALES") {
            settings.locales = locales
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Some(mode) = lookup("MSGRES_POPULATION") {
            settings.population =
                mode.parse::<PopulationMode>()
                    .map_err(|message| SettingsError::EnvParseError {
                        var: "MSGRES_POPULATION".to_string(),
                        message,
                    })?;
        }

        Ok(())
    }
}
