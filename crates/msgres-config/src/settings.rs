//! Resource source settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

/// Default directory holding the properties units
pub const DEFAULT_DIRECTORY: &str = "resources";

/// Default base name of the properties units
pub const DEFAULT_FILE_NAME: &str = "messages";

/// Default extension of the properties units
pub const DEFAULT_EXTENSION: &str = "properties";

/// When the cache is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationMode {
    /// Populate on the first lookup
    #[default]
    OnDemand,
    /// Populate during an explicit `initialize()` call
    Eager,
}

impl fmt::Display for PopulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnDemand => write!(f, "on_demand"),
            Self::Eager => write!(f, "eager"),
        }
    }
}

impl FromStr for PopulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "on_demand" | "lazy" => Ok(Self::OnDemand),
            "eager" | "initial_load" => Ok(Self::Eager),
            other => Err(format!("unknown population mode '{other}'")),
        }
    }
}

/// Settings for the resource loader and cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceSettings {
    /// Directory holding the properties units
    pub directory: PathBuf,

    /// Base file name; units are `<file_name>.<ext>` and `<file_name>_<locale>.<ext>`
    #[validate(length(min = 1, message = "file name cannot be empty"))]
    #[validate(custom(
        function = "crate::validation::validate_file_name",
        message = "file name must not contain path separators"
    ))]
    pub file_name: String,

    /// Unit extension without the leading dot; empty means no extension
    pub extension: String,

    /// Language of the base unit; `None` uses the runtime default language
    pub default_locale: Option<String>,

    /// Additional locale codes, one unit each
    pub locales: Vec<String>,

    /// Population timing
    pub population: PopulationMode,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_name: DEFAULT_FILE_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            default_locale: None,
            locales: Vec::new(),
            population: PopulationMode::default(),
        }
    }
}

impl ResourceSettings {
    /// Run derived validation plus the locale code checks
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;

        let mut errors = validator::ValidationErrors::new();

        if let Some(ref code) = self.default_locale {
            if let Err(err) = crate::validation::validate_locale_code(code) {
                errors.add("default_locale", err);
            }
        }

        for code in &self.locales {
            if let Err(err) = crate::validation::validate_locale_code(code) {
                errors.add("locales", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
