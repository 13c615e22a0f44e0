//! # msgres config
//!
//! Typed settings describing where string resources come from and when they
//! are loaded.
//!
//! Settings are read from YAML or TOML files, overridden from `MSGRES_*`
//! environment variables and validated before use.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{SettingsError, SettingsLoader};
pub use settings::{PopulationMode, ResourceSettings};
