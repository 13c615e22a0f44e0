//! String resources read from per-locale `.properties` files

use super::StaticDataLoader;
use crate::locale::{language_code, runtime_language};
use crate::properties;
use crate::resource::{ResourceSetBuilder, StringResource};
use msgres_common::{ResourceError, Result};
use msgres_config::settings::{DEFAULT_DIRECTORY, DEFAULT_EXTENSION, DEFAULT_FILE_NAME};
use msgres_config::ResourceSettings;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the properties units live and which locales to read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesLoaderConfig {
    directory: PathBuf,
    file_name: String,
    extension: String,
    default_locale: String,
    locales: BTreeSet<String>,
}

impl Default for PropertiesLoaderConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            file_name: DEFAULT_FILE_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            default_locale: runtime_language().to_string(),
            locales: BTreeSet::new(),
        }
    }
}

impl From<&ResourceSettings> for PropertiesLoaderConfig {
    fn from(settings: &ResourceSettings) -> Self {
        let config = Self::default()
            .with_directory(&settings.directory)
            .with_file_name(&settings.file_name)
            .with_extension(&settings.extension)
            .with_locales(&settings.locales);

        match settings.default_locale {
            Some(ref locale) => config.with_default_locale(locale),
            None => config,
        }
    }
}

impl PropertiesLoaderConfig {
    /// Defaults: `resources/messages.properties` in the runtime language
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding the units
    #[must_use]
    pub fn with_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.directory = directory.as_ref().to_path_buf();
        self
    }

    /// Base file name of the units
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Unit extension without the dot; empty for none
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Language of the base unit
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Add locales to read; repeated calls accumulate
    #[must_use]
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales.extend(locales.into_iter().map(Into::into));
        self
    }

    /// Directory holding the units
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Base file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Language of the base unit
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Additional locales, sorted
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    /// Path of the unit for `locale`, or of the base unit for `None`
    pub fn unit_path(&self, locale: Option<&str>) -> PathBuf {
        let stem = match locale {
            Some(locale) => format!("{}_{}", self.file_name, locale),
            None => self.file_name.clone(),
        };
        let name = if self.extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", self.extension)
        };
        self.directory.join(name)
    }

    /// `(language, path)` of every unit, base unit first
    fn units(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut units = vec![(language_code(&self.default_locale)?, self.unit_path(None))];
        for locale in &self.locales {
            units.push((language_code(locale)?, self.unit_path(Some(locale))));
        }
        Ok(units)
    }
}

/// Loads [`StringResource`]s from a base properties unit plus one unit per
/// configured locale.
///
/// A key found in several units becomes one resource carrying every language
/// it appeared in. Any unreadable or undecodable unit fails the whole pass.
#[derive(Debug)]
pub struct PropertiesStringResourceLoader {
    config: PropertiesLoaderConfig,
    messages: OnceCell<BTreeMap<String, Arc<StringResource>>>,
    load_passes: AtomicUsize,
}

impl Default for PropertiesStringResourceLoader {
    fn default() -> Self {
        Self::new(PropertiesLoaderConfig::default())
    }
}

impl PropertiesStringResourceLoader {
    /// Create a loader; nothing is read until the first lookup
    pub fn new(config: PropertiesLoaderConfig) -> Self {
        Self {
            config,
            messages: OnceCell::new(),
            load_passes: AtomicUsize::new(0),
        }
    }

    /// The loader configuration
    pub fn config(&self) -> &PropertiesLoaderConfig {
        &self.config
    }

    /// Number of full load passes started so far, failed ones included
    pub fn load_passes(&self) -> usize {
        self.load_passes.load(Ordering::SeqCst)
    }

    /// Whether a load pass has completed successfully
    pub fn is_loaded(&self) -> bool {
        self.messages.get().is_some()
    }

    fn messages(&self) -> Result<&BTreeMap<String, Arc<StringResource>>> {
        self.messages.get_or_try_init(|| self.read_all())
    }

    fn read_all(&self) -> Result<BTreeMap<String, Arc<StringResource>>> {
        self.load_passes.fetch_add(1, Ordering::SeqCst);

        let mut builder = ResourceSetBuilder::new();
        let units = self.config.units()?;
        for (language, path) in &units {
            read_unit(language, path, &mut builder)?;
        }

        let resources = builder.build();
        info!(
            "Loaded {} string resources from {} properties units in {}",
            resources.len(),
            units.len(),
            self.config.directory.display()
        );
        Ok(resources)
    }
}

fn read_unit(language: &str, path: &Path, builder: &mut ResourceSetBuilder) -> Result<()> {
    debug!("Reading properties unit {} for language {}", path.display(), language);

    let bytes = fs::read(path).map_err(|e| ResourceError::load(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| ResourceError::load(path, e))?;
    merge_unit(language, path, &content, builder)
}

/// Parse one unit's text and add its entries under `language`.
///
/// `origin` names the unit in errors and warnings.
pub(super) fn merge_unit(
    language: &str,
    origin: &Path,
    content: &str,
    builder: &mut ResourceSetBuilder,
) -> Result<()> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let entries = properties::parse(content).map_err(|e| ResourceError::load(origin, e))?;

    for entry in entries {
        let line = entry.line;
        if builder.insert(entry.key.as_str(), language, entry.value).is_some() {
            warn!(
                "Key '{}' redefined for language {} at {}:{}",
                entry.key,
                language,
                origin.display(),
                line
            );
        }
    }

    Ok(())
}

impl StaticDataLoader<StringResource> for PropertiesStringResourceLoader {
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
