//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a whole file as UTF-8 text.
///
/// Invalid UTF-8 surfaces as an `internal.io_error` like any other read failure.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Overwrite a file in place. No backup, no temp-file swap.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Move `from` to `to`, refusing to clobber an existing destination.
///
/// The only existing destination accepted is the source itself, as seen
/// through a case-insensitive filesystem. Two names that differ only in case
/// are two separate files on a case-sensitive filesystem.
pub fn rename_path(from: &Path, to: &Path, operation: &str) -> Result<()> {
    if let Ok(existing) = fs::symlink_metadata(to) {
        let source = fs::symlink_metadata(from)
            .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))?;
        if !same_entry(from, &source, to, &existing) {
            return Err(Error::internal_io(
                "destination already exists",
                Some(operation.to_string()),
            ));
        }
    }

    fs::rename(from, to).map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

#[cfg(unix)]
fn same_entry(_: &Path, a: &fs::Metadata, _: &Path, b: &fs::Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;
    a.dev() == b.dev() && a.ino() == b.ino()
}

#[cfg(not(unix))]
fn same_entry(a: &Path, _: &fs::Metadata, b: &Path, _: &fs::Metadata) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
