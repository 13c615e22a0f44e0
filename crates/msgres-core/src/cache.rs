//! Population-once, read-many cache over a [`StaticDataLoader`].
//!
//! The cache fills itself from [`StaticDataLoader::load_all`] exactly once,
//! either when [`BasicStaticDataCache::initialize`] is called (eager mode) or
//! on the first lookup (on-demand mode). After that every lookup is a plain
//! map read with no locking. There is no eviction and no reload.

use crate::loader::StaticDataLoader;
use msgres_common::{ResourceError, Result};
use msgres_config::PopulationMode;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read side of a static data cache
pub trait StaticDataCache<T>: Send + Sync {
    /// Value stored under `id`; `Ok(None)` when the source has no such id
    fn value(&self, id: &str) -> Result<Option<Arc<T>>>;

    /// Values whose `index_name` key equals `key`
    fn values(&self, index_name: &str, key: &str) -> Result<Vec<Arc<T>>>;
}

struct CacheState<T> {
    entries: HashMap<String, Arc<T>>,
    indexes: HashMap<String, HashMap<String, Vec<Arc<T>>>>,
}

/// Default [`StaticDataCache`] implementation
pub struct BasicStaticDataCache<T> {
    loader: Arc<dyn StaticDataLoader<T>>,
    mode: PopulationMode,
    state: OnceCell<CacheState<T>>,
}

impl<T> fmt::Debug for BasicStaticDataCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicStaticDataCache")
            .field("mode", &self.mode)
            .field("populated", &self.is_populated())
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> BasicStaticDataCache<T> {
    /// Create a cache; nothing is loaded until [`initialize`](Self::initialize)
    /// or the first lookup
    pub fn new(loader: Arc<dyn StaticDataLoader<T>>, mode: PopulationMode) -> Self {
        Self {
            loader,
            mode,
            state: OnceCell::new(),
        }
    }

    /// Cache populated on first lookup
    pub fn on_demand(loader: Arc<dyn StaticDataLoader<T>>) -> Self {
        Self::new(loader, PopulationMode::OnDemand)
    }

    /// Cache populated by [`initialize`](Self::initialize)
    pub fn eager(loader: Arc<dyn StaticDataLoader<T>>) -> Self {
        Self::new(loader, PopulationMode::Eager)
    }

    /// Population timing of this cache
    pub const fn mode(&self) -> PopulationMode {
        self.mode
    }

    /// Whether a population pass has completed
    pub fn is_populated(&self) -> bool {
        self.state.get().is_some()
    }

    /// Number of cached ids, zero before population
    pub fn len(&self) -> usize {
        self.state.get().map_or(0, |state| state.entries.len())
    }

    /// Whether no id is cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Populate an eager cache.
    ///
    /// A second call on a populated cache does nothing, and so does any call
    /// in on-demand mode. A failed load leaves the cache unpopulated.
    pub fn initialize(&self) -> Result<()> {
        if self.mode == PopulationMode::OnDemand {
            debug!("On-demand cache: initialize() defers loading to the first lookup");
            return Ok(());
        }
        if self.is_populated() {
            debug!("Cache already populated, ignoring initialize()");
            return Ok(());
        }
        self.populate().map(|_| ())
    }

    fn state(&self) -> Result<&CacheState<T>> {
        if let Some(state) = self.state.get() {
            return Ok(state);
        }
        if self.mode == PopulationMode::Eager {
            warn!("Eager cache queried before initialize(), populating now");
        }
        self.populate()
    }

    fn populate(&self) -> Result<&CacheState<T>> {
        self.state.get_or_try_init(|| {
            let values = self.loader.load_all()?;

            let mut entries = HashMap::with_capacity(values.len());
            for value in &values {
                entries.insert(self.loader.id_of(value), Arc::clone(value));
            }

            let mut indexes = HashMap::new();
            for index_name in self.loader.index_names().unwrap_or_default() {
                let mut index: HashMap<String, Vec<Arc<T>>> = HashMap::new();
                for value in &values {
                    if let Some(key) = self.loader.index_key(&index_name, value) {
                        index.entry(key).or_default().push(Arc::clone(value));
                    }
                }
                indexes.insert(index_name, index);
            }

            info!(
                "Static data cache populated with {} entries and {} indexes",
                entries.len(),
                indexes.len()
            );
            Ok(CacheState { entries, indexes })
        })
    }
}

impl<T: Send + Sync> StaticDataCache<T> for BasicStaticDataCache<T> {
    fn value(&self, id: &str) -> Result<Option<Arc<T>>> {
        Ok(self.state()?.entries.get(id).cloned())
    }

    fn values(&self, index_name: &str, key: &str) -> Result<Vec<Arc<T>>> {
        let index = self
            .state()?
            .indexes
            .get(index_name)
            .ok_or_else(|| ResourceError::config(format!("index '{index_name}' is not defined")))?;
        Ok(index.get(key).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    #[derive(Debug, PartialEq, Eq)]
    struct Code {
        id: String,
        group: String,
    }

    fn code(id: &str, group: &str) -> Arc<Code> {
        Arc::new(Code {
            id: id.to_string(),
            group: group.to_string(),
        })
    }

    #[derive(Default)]
    struct CountingLoader {
        passes: AtomicUsize,
        fail_next: AtomicBool,
    }

    impl StaticDataLoader<Code> for CountingLoader {
        fn load_value(&self, id: &str) -> Result<Option<Arc<Code>>> {
            Ok(self.load_all()?.into_iter().find(|c| c.id == id))
        }

        fn load_all(&self) -> Result<Vec<Arc<Code>>> {
            self.passes.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(20));
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(ResourceError::load(
                    "codes",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
                ));
            }
            Ok(vec![code("A1", "a"), code("A2", "a"), code("B1", "b")])
        }

        fn id_of(&self, value: &Code) -> String {
            value.id.clone()
        }

        fn index_names(&self) -> Option<Vec<String>> {
            Some(vec!["group".to_string()])
        }

        fn index_key(&self, index_name: &str, value: &Code) -> Option<String> {
            (index_name == "group").then(|| value.group.clone())
        }
    }

    fn cache(mode: PopulationMode) -> (Arc<CountingLoader>, BasicStaticDataCache<Code>) {
        let loader = Arc::new(CountingLoader::default());
        let shared: Arc<dyn StaticDataLoader<Code>> = Arc::clone(&loader) as _;
        let cache = BasicStaticDataCache::new(shared, mode);
        (loader, cache)
    }

    #[test]
    fn test_on_demand_populates_on_first_lookup() {
        let (loader, cache) = cache(PopulationMode::OnDemand);

        cache.initialize().unwrap();
        assert!(!cache.is_populated());
        assert_eq!(loader.passes.load(Ordering::SeqCst), 0);

        assert_eq!(cache.value("A1").unwrap().unwrap().group, "a");
        assert!(cache.value("missing").unwrap().is_none());
        assert!(cache.is_populated());
        assert_eq!(cache.len(), 3);
        assert_eq!(loader.passes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_eager_initialize_twice_loads_once() {
        let (loader, cache) = cache(PopulationMode::Eager);

        cache.initialize().unwrap();
        cache.initialize().unwrap();
        assert!(cache.is_populated());
        assert_eq!(cache.value("B1").unwrap().unwrap().id, "B1");
        assert_eq!(loader.passes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_eager_lookup_before_initialize_populates() {
        let (loader, cache) = cache(PopulationMode::Eager);
        assert!(cache.value("A2").unwrap().is_some());
        assert_eq!(loader.passes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_secondary_index_lookup() {
        let (_, cache) = cache(PopulationMode::OnDemand);

        let group_a = cache.values("group", "a").unwrap();
        assert_eq!(group_a.len(), 2);
        assert!(cache.values("group", "z").unwrap().is_empty());
        assert!(cache.values("unknown", "a").is_err());
    }

    #[test]
    fn test_failed_population_is_surfaced_then_retried() {
        let (loader, cache) = cache(PopulationMode::Eager);
        loader.fail_next.store(true, Ordering::SeqCst);

        let err = cache.initialize().unwrap_err();
        assert!(err.is_configuration_load());
        assert!(!cache.is_populated());

        cache.initialize().unwrap();
        assert_eq!(cache.len(), 3);
        assert_eq!(loader.passes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let (loader, cache) = cache(PopulationMode::OnDemand);
        let cache = Arc::new(cache);
        let barrier = Arc::new(Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.value("B1").unwrap().unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().group, "b");
        }
        assert_eq!(loader.passes.load(Ordering::SeqCst), 1);
    }
}
