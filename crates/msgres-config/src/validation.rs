//! Validation helpers for resource settings

use unic_langid::LanguageIdentifier;
use validator::ValidationError;

/// Validate that a base file name is a bare name, not a path
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new("empty_file_name"));
    }

    if name.contains(['/', '\\']) {
        return Err(ValidationError::new("file_name_contains_separator"));
    }

    Ok(())
}

/// Validate a locale code such as `en`, `ja_JP` or `zh-Hant-TW`
pub fn validate_locale_code(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::new("empty_locale_code"));
    }

    code.replace('_', "-")
        .parse::<LanguageIdentifier>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_locale_code"))
}
