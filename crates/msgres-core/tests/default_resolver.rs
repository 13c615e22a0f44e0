//! The default holder must answer the same wherever the process runs.
//!
//! Kept in its own test binary: it changes the process working directory
//! before the default holder is first touched.

use msgres_common::test_utils::{create_temp_dir, init_test_logging};
use msgres_core::locale::runtime_language;
use msgres_core::{default_holder, MessageResolver};
use std::env;

#[test]
fn test_default_holder_ignores_working_directory() {
    init_test_logging();
    let elsewhere = create_temp_dir();
    env::set_current_dir(elsewhere.path()).unwrap();

    let resource = MessageResolver::new().string_resource("default.key").unwrap();
    assert_eq!(resource.text_for_language(runtime_language()).unwrap(), "デフォルト");

    let all = default_holder().get("load.all.key").unwrap();
    assert_eq!(all.text_for_language(runtime_language()).unwrap(), "loadAllValue");
}
