//! String resources compiled into the binary

use super::properties::merge_unit;
use super::StaticDataLoader;
use crate::locale::language_code;
use crate::resource::{ResourceSetBuilder, StringResource};
use msgres_common::Result;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
struct BundledUnit {
    name: &'static str,
    locale: String,
    content: &'static str,
}

/// Loads [`StringResource`]s from properties units embedded with
/// `include_str!`.
///
/// Units use the same grammar and merge rules as
/// [`PropertiesStringResourceLoader`](super::PropertiesStringResourceLoader),
/// but nothing touches the filesystem, so the result does not depend on the
/// working directory.
#[derive(Debug, Default)]
pub struct BundledStringResourceLoader {
    units: Vec<BundledUnit>,
    messages: OnceCell<BTreeMap<String, Arc<StringResource>>>,
    load_passes: AtomicUsize,
}

impl BundledStringResourceLoader {
    /// Loader with no units
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit in `locale`; `name` identifies it in errors
    #[must_use]
    pub fn with_unit(
        mut self,
        name: &'static str,
        locale: impl Into<String>,
        content: &'static str,
    ) -> Self {
        self.units.push(BundledUnit {
            name,
            locale: locale.into(),
            content,
        });
        self
    }

    /// Number of full load passes started so far, failed ones included
    pub fn load_passes(&self) -> usize {
        self.load_passes.load(Ordering::SeqCst)
    }

    fn messages(&self) -> Result<&BTreeMap<String, Arc<StringResource>>> {
        self.messages.get_or_try_init(|| self.read_all())
    }

    fn read_all(&self) -> Result<BTreeMap<String, Arc<StringResource>>> {
        self.load_passes.fetch_add(1, Ordering::SeqCst);

        let mut builder = ResourceSetBuilder::new();
        for unit in &self.units {
            let language = language_code(&unit.locale)?;
            merge_unit(&language, Path::new(unit.name), unit.content, &mut builder)?;
        }

        let resources = builder.build();
        info!(
            "Loaded {} string resources from {} bundled units",
            resources.len(),
            self.units.len()
        );
        Ok(resources)
    }
}

impl StaticDataLoader<StringResource> for BundledStringResourceLoader {
    fn load_value(&self, id: &str) -> Result<Option<Arc<StringResource>>> {
        Ok(self.messages()?.get(id).cloned())
    }

    fn load_all(&self) -> Result<Vec<Arc<StringResource>>> {
        Ok(self.messages()?.values().cloned().collect())
    }

    fn id_of(&self, value: &StringResource) -> String {
        value.id().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_merge_by_language() {
        let loader = BundledStringResourceLoader::new()
            .with_unit("messages.properties", "ja_JP", "10001=メッセージ001\nonly.ja=日本語\n")
            .with_unit("messages_en.properties", "en", "10001=Message001\r\n");

        let resource = loader.load_value("10001").unwrap().unwrap();
        assert_eq!(resource.text_for_language("ja").unwrap(), "メッセージ001");
        assert_eq!(resource.text_for_language("en").unwrap(), "Message001");
        assert_eq!(loader.load_all().unwrap().len(), 2);
        assert!(loader.load_value("missing").unwrap().is_none());
        assert_eq!(loader.load_passes(), 1);
    }

    #[test]
    fn test_malformed_unit_names_its_origin() {
        let loader =
            BundledStringResourceLoader::new().with_unit("broken.properties", "en", "k=\\u12\n");

        let err = loader.load_all().unwrap_err();
        assert!(err.is_configuration_load());
        assert!(err.to_string().contains("broken.properties"));
    }

    #[test]
    fn test_invalid_locale_fails_the_pass() {
        let loader = BundledStringResourceLoader::new().with_unit("m.properties", "no such locale", "k=v\n");
        assert!(loader.load_all().is_err());
        assert_eq!(loader.load_passes(), 1);
    }
}
