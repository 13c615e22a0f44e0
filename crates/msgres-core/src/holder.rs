//! Id-validating facade over a string resource cache

use crate::cache::{BasicStaticDataCache, StaticDataCache};
use crate::loader::{PropertiesLoaderConfig, PropertiesStringResourceLoader, StaticDataLoader};
use crate::resource::StringResource;
use msgres_common::{ResourceError, Result};
use msgres_config::{PopulationMode, ResourceSettings};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Serves [`StringResource`]s by id.
///
/// Rejects missing or empty ids and turns cache absence into
/// [`ResourceError::ResourceNotFound`]. Locale selection is left to the
/// returned resource.
#[derive(Clone)]
pub struct StringResourceHolder {
    cache: Arc<dyn StaticDataCache<StringResource>>,
}

impl fmt::Debug for StringResourceHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringResourceHolder").finish_non_exhaustive()
    }
}

impl StringResourceHolder {
    /// Wrap an existing cache
    pub fn new(cache: Arc<dyn StaticDataCache<StringResource>>) -> Self {
        Self { cache }
    }

    /// Holder over a fresh [`BasicStaticDataCache`] fed by `loader`.
    ///
    /// In eager mode the cache is populated before this returns, so load
    /// failures surface here rather than on the first lookup.
    pub fn from_loader<L>(loader: L, mode: PopulationMode) -> Result<Self>
    where
        L: StaticDataLoader<StringResource> + 'static,
    {
        let loader: Arc<dyn StaticDataLoader<StringResource>> = Arc::new(loader);
        let cache = BasicStaticDataCache::new(loader, mode);
        cache.initialize()?;
        Ok(Self::new(Arc::new(cache)))
    }

    /// Holder over the properties units described by `settings`.
    ///
    /// Table-backed holders are built with [`from_loader`](Self::from_loader)
    /// and a [`TableStringResourceLoader`](crate::loader::TableStringResourceLoader)
    /// over an application row source.
    pub fn from_settings(settings: &ResourceSettings) -> Result<Self> {
        let config = PropertiesLoaderConfig::from(settings);
        debug!(
            "Building {} holder over {}",
            settings.population,
            config.unit_path(None).display()
        );
        Self::from_loader(PropertiesStringResourceLoader::new(config), settings.population)
    }

    /// Resource for `id`.
    ///
    /// `None` and `""` fail with [`ResourceError::InvalidIdentifier`]; an id
    /// the source does not contain fails with
    /// [`ResourceError::ResourceNotFound`]. The first call on an on-demand
    /// cache loads the whole source.
    pub fn get<'a>(&self, id: impl Into<Option<&'a str>>) -> Result<Arc<StringResource>> {
        let id = match id.into() {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ResourceError::InvalidIdentifier),
        };

        self.cache
            .value(id)?
            .ok_or_else(|| ResourceError::not_found(id))
    }
}
