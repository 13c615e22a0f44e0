//! Loaders that materialize static data from a backing store.
//!
//! A loader reads its whole source in one pass the first time it is asked for
//! anything, and answers later calls from the materialized set. Concurrent
//! callers arriving during that first pass wait for it instead of starting
//! their own.

pub mod bundled;
pub mod properties;
pub mod table;

pub use bundled::BundledStringResourceLoader;
pub use properties::{PropertiesLoaderConfig, PropertiesStringResourceLoader};
pub use table::{ResourceRow, RowSource, TableStringResourceLoader, VecRowSource};

use msgres_common::Result;
use std::sync::Arc;

/// Reads static data of type `T` from one backing store.
///
/// The index hooks let a single cache serve both id-keyed and secondary-indexed
/// data sets. Loaders without secondary indices keep the defaults, which report
/// no index support.
pub trait StaticDataLoader<T>: Send + Sync {
    /// Value for one id, loading the whole source first if needed.
    ///
    /// `Ok(None)` means the source has no such id.
    fn load_value(&self, id: &str) -> Result<Option<Arc<T>>>;

    /// Every value the source contains, loading it first if needed
    fn load_all(&self) -> Result<Vec<Arc<T>>>;

    /// Id under which the cache stores `value`
    fn id_of(&self, value: &T) -> String;

    /// Names of the secondary indices, `None` when unsupported
    fn index_names(&self) -> Option<Vec<String>> {
        None
    }

    /// Values whose `index_name` key equals `key`, `None` when unsupported
    fn load_indexed(&self, _index_name: &str, _key: &str) -> Result<Option<Vec<Arc<T>>>> {
        Ok(None)
    }

    /// Key of `value` within `index_name`, `None` when unsupported
    fn index_key(&self, _index_name: &str, _value: &T) -> Option<String> {
        None
    }
}
