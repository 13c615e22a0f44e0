//! Error types for string resource loading and resolution

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error used as the source of load and configuration failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for msgres operations
pub type Result<T> = std::result::Result<T, ResourceError>;

/// Errors raised while loading, caching or resolving string resources
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A backing source unit could not be read or decoded
    #[error("failed to load the file. file path = [{}]", .path.display())]
    ConfigurationLoad {
        /// Path (or table name) of the offending source unit
        path: PathBuf,
        /// Read or decode failure
        #[source]
        source: BoxError,
    },

    /// A non-empty id has no resource after population
    #[error("resource was not found, id = {id}")]
    ResourceNotFound {
        /// The id that was requested
        id: String,
    },

    /// The id handed to the holder was missing or empty
    #[error("null or empty id specified, please set an id")]
    InvalidIdentifier,

    /// The resource exists but carries no text for the language
    #[error("language was not supported, id = {id}, language = {language}")]
    UnsupportedLocale {
        /// Id of the resource that was queried
        id: String,
        /// Language code that had no entry
        language: String,
    },

    /// Settings were rejected before any load was attempted
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what was rejected
        message: String,
        /// Underlying cause, when there is one
        #[source]
        source: Option<BoxError>,
    },
}

impl ResourceError {
    /// Create a load failure for the given source path
    pub fn load(path: impl AsRef<Path>, source: impl Into<BoxError>) -> Self {
        Self::ConfigurationLoad {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Create a not-found error for the given id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::ResourceNotFound { id: id.into() }
    }

    /// Create an unsupported-locale error
    pub fn unsupported_locale(id: impl Into<String>, language: impl Into<String>) -> Self {
        Self::UnsupportedLocale {
            id: id.into(),
            language: language.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this is a failure to read or decode a source unit
    pub const fn is_configuration_load(&self) -> bool {
        matches!(self, Self::ConfigurationLoad { .. })
    }

    /// Whether the requested id had no resource
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Whether the caller passed a missing or empty id
    pub const fn is_invalid_identifier(&self) -> bool {
        matches!(self, Self::InvalidIdentifier)
    }

    /// Whether the resource lacked the requested language
    pub const fn is_unsupported_locale(&self) -> bool {
        matches!(self, Self::UnsupportedLocale { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_display_formatting() {
        let error = ResourceError::not_found("doesNotExist");
        assert_eq!(error.to_string(), "resource was not found, id = doesNotExist");

        let error = ResourceError::InvalidIdentifier;
        assert_eq!(
            error.to_string(),
            "null or empty id specified, please set an id"
        );

        let error = ResourceError::unsupported_locale("default.key", "en");
        assert!(error.to_string().contains("default.key"));
        assert!(error.to_string().contains("language = en"));

        let error = ResourceError::config("missing file name");
        assert_eq!(error.to_string(), "Configuration error: missing file name");
    }

    #[test]
    fn test_load_error_names_path_and_keeps_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = ResourceError::load("resources/messages.properties", io_error);

        assert_eq!(
            error.to_string(),
            "failed to load the file. file path = [resources/messages.properties]"
        );
        assert!(error.source().is_some());
        assert!(error.is_configuration_load());
    }

    #[test]
    fn test_predicates_are_exclusive() {
        let not_found = ResourceError::not_found("x");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_invalid_identifier());
        assert!(!not_found.is_unsupported_locale());

        let invalid = ResourceError::InvalidIdentifier;
        assert!(invalid.is_invalid_identifier());
        assert!(!invalid.is_not_found());

        let unsupported = ResourceError::unsupported_locale("x", "fr");
        assert!(unsupported.is_unsupported_locale());
        assert!(!unsupported.is_configuration_load());
    }

    #[test]
    fn test_every_variant_is_classified() {
        let errors = [
            ResourceError::load("messages.properties", io::Error::from(io::ErrorKind::NotFound)),
            ResourceError::not_found("x"),
            ResourceError::InvalidIdentifier,
            ResourceError::unsupported_locale("x", "fr"),
            ResourceError::config("bad"),
        ];

        for error in &errors {
            let classified = match error {
                ResourceError::ConfigurationLoad { .. } => error.is_configuration_load(),
                ResourceError::ResourceNotFound { .. } => error.is_not_found(),
                ResourceError::InvalidIdentifier => error.is_invalid_identifier(),
                ResourceError::UnsupportedLocale { .. } => error.is_unsupported_locale(),
                ResourceError::Config { .. } => !error.is_configuration_load(),
            };
            assert!(classified, "{error}");
        }
    }

    #[test]
    fn test_config_with_source_chains() {
        let error = ResourceError::config_with_source(
            "settings file unreadable",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );
        assert!(error.to_string().contains("settings file unreadable"));
        assert!(error.source().is_some());
    }
}
