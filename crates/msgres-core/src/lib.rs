//! # msgres core
//!
//! Resolves a message id plus a locale into a localized text template.
//!
//! - [`loader`]: pluggable readers for properties files and `(id, lang, text)` tables
//! - [`cache`]: population-once static data cache, eager or on-demand
//! - [`holder`]: id validation and not-found policy over the cache
//! - [`resolver`]: registry lookup falling back to a built-in default holder
//! - [`message`]: resolved resources wrapped with a level and arguments
//!
//! # Example
//!
//! ```rust
//! use msgres_config::PopulationMode;
//! use msgres_core::loader::{ResourceRow, TableStringResourceLoader, VecRowSource};
//! use msgres_core::StringResourceHolder;
//!
//! # fn example() -> msgres_common::Result<()> {
//! let rows = VecRowSource::new(
//!     "MESSAGE",
//!     vec![
//!         ResourceRow::new("10001", "ja", "メッセージ001"),
//!         ResourceRow::new("10001", "en", "Message001"),
//!     ],
//! );
//! let holder = StringResourceHolder::from_loader(
//!     TableStringResourceLoader::new(rows),
//!     PopulationMode::OnDemand,
//! )?;
//!
//! let resource = holder.get("10001")?;
//! assert_eq!(resource.text(&"en-US".parse().unwrap())?, "Message001");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod holder;
pub mod loader;
pub mod locale;
pub mod message;
pub mod properties;
pub mod registry;
pub mod resolver;
pub mod resource;

pub use cache::{BasicStaticDataCache, StaticDataCache};
pub use holder::StringResourceHolder;
pub use loader::{
    BundledStringResourceLoader, PropertiesLoaderConfig, PropertiesStringResourceLoader, StaticDataLoader,
    TableStringResourceLoader,
};
pub use message::{Message, MessageArg, MessageLevel};
pub use registry::{ComponentRegistry, InMemoryRegistry, STRING_RESOURCE_HOLDER_NAME};
pub use resolver::{default_holder, MessageResolver};
pub use resource::StringResource;
