//! # msgres common
//!
//! Shared error taxonomy, structured logging bootstrap and test helpers used
//! across the msgres workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{ResourceError, Result};
pub use logging::{init_default_logging, init_dev_logging, init_logging, LoggingConfig};
