//! Locale parsing and runtime language detection

use msgres_common::{ResourceError, Result};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

/// Language used when the runtime locale cannot be detected
pub const FALLBACK_LANGUAGE: &str = "en";

static RUNTIME_LANGUAGE: Lazy<String> = Lazy::new(|| {
    sys_locale::get_locale()
        .and_then(|tag| language_code(&tag).ok())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
});

/// Parse a locale code, accepting both `ja-JP` and `ja_JP` forms.
///
/// POSIX suffixes such as `.UTF-8` or `@euro` are dropped before parsing.
pub fn parse_locale(code: &str) -> Result<LanguageIdentifier> {
    let tag = code
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-");

    tag.parse::<LanguageIdentifier>()
        .map_err(|e| ResourceError::config_with_source(format!("invalid locale code '{code}'"), e))
}

/// Lowercase language subtag of a locale code (`ja_JP` becomes `ja`)
pub fn language_code(code: &str) -> Result<String> {
    Ok(language_of(&parse_locale(code)?))
}

/// Lowercase language subtag of a parsed locale
pub fn language_of(locale: &LanguageIdentifier) -> String {
    locale.language.as_str().to_ascii_lowercase()
}

/// The process default language, detected once from the operating system
pub fn runtime_language() -> &'static str {
    RUNTIME_LANGUAGE.as_str()
}

/// The process default language as a locale
pub fn runtime_locale() -> LanguageIdentifier {
    parse_locale(runtime_language()).unwrap_or_default()
}
