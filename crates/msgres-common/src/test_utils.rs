//! Test utilities shared across the msgres workspace.
//!
//! Enabled for other crates through the `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write a UTF-8 source unit named `file_name` into `dir` and return its path.
pub fn write_unit(dir: &Path, file_name: &str, content: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, content).expect("Failed to write test source unit");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_unit_round_trips_utf8() {
        init_test_logging();
        let dir = create_temp_dir();
        let path = write_unit(dir.path(), "messages.properties", "default.key=デフォルト\n");

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "default.key=デフォルト\n"
        );
    }
}
