#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub use critpath_test_utils::init_tracing;

/// Write `contents` to a fresh temporary `.toml` file.
pub fn project_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    write!(file, "{contents}").unwrap();
    file
}
