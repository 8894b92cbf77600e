//! Shared test utilities for creating temporary image files.

use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
///
/// The file will be automatically cleaned up when the returned
/// `NamedTempFile` is dropped.
///
/// # Panics
///
/// Panics if the temporary file cannot be created or if writing to it fails
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}
