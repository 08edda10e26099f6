//! Input validation primitives for the engine boundary.
//!
//! The engine assumes its root is an existing directory; callers check it here.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Require a path to name an existing directory.
pub fn require_directory(path: &str) -> Result<PathBuf> {
    if Path::new(path).is_dir() {
        Ok(PathBuf::from(path))
    } else {
        Err(Error::not_a_directory(path))
    }
}
