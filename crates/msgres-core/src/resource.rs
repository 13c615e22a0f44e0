//! Localized string resources

use crate::locale::language_of;
use msgres_common::{ResourceError, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use unic_langid::LanguageIdentifier;

/// One message id with a text template per language.
///
/// The language map is fixed at construction. Matching uses the language
/// subtag only; region and variants of the requested locale are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringResource {
    id: String,
    texts: BTreeMap<String, String>,
}

impl StringResource {
    /// Create a resource from an id and a language → text map
    pub fn new<I, K, V>(id: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            id: id.into(),
            texts: texts
                .into_iter()
                .map(|(lang, text)| (lang.into().to_ascii_lowercase(), text.into()))
                .collect(),
        }
    }

    /// The message id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text template for the locale's language.
    ///
    /// Fails with [`ResourceError::UnsupportedLocale`] when the language has no
    /// entry. No fallback to another language is attempted.
    pub fn text(&self, locale: &LanguageIdentifier) -> Result<&str> {
        self.text_for_language(&language_of(locale))
    }

    /// Text template for an explicit language code such as `"ja"`
    pub fn text_for_language(&self, language: &str) -> Result<&str> {
        self.texts
            .get(&language.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| ResourceError::unsupported_locale(&self.id, language))
    }

    /// Whether a text exists for the language code
    pub fn supports(&self, language: &str) -> bool {
        self.texts.contains_key(&language.to_ascii_lowercase())
    }

    /// Language codes carried by this resource, sorted
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.texts.keys().map(String::as_str)
    }

    /// Whether no language was loaded for this id
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Accumulates `(id, language, text)` entries from several source units and
/// freezes them into immutable resources.
#[derive(Debug, Default)]
pub struct ResourceSetBuilder {
    entries: BTreeMap<String, HashMap<String, String>>,
}

impl ResourceSetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the text of `id` for `language`; a later entry for the same pair wins
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<String> {
        self.entries
            .entry(id.into())
            .or_default()
            .insert(language.into().to_ascii_lowercase(), text.into())
    }

    /// Number of distinct ids recorded so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze into id → resource, ordered by id
    pub fn build(self) -> BTreeMap<String, Arc<StringResource>> {
        self.entries
            .into_iter()
            .map(|(id, texts)| {
                let resource = Arc::new(StringResource::new(id.clone(), texts));
                (id, resource)
            })
            .collect()
    }
}
