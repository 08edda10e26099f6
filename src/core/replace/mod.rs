//! Case-insensitive literal replacement across a directory tree.
//!
//! Given a `SearchSpec` (old → new), the engine:
//! 1. Walks the tree bottom-up, children before their parent directory
//! 2. Rewrites matching text inside every file
//! 3. Renames every file and directory whose name contains the term
//! 4. Reports each change or failure to a `Reporter` and returns a `RunSummary`
//!
//! Per-entry I/O failures are reported and absorbed; a run never aborts
//! half way because one file could not be read or renamed.

mod content;
mod rename;
mod report;
mod text;
mod walk;

use serde::Serialize;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub use content::replace_in_file;
pub use rename::{rename_entry, RenameOutcome};
pub use report::{ConsoleReporter, RecordingReporter, ReplaceEvent, Reporter};
pub use text::{contains_case_insensitive, replace_case_insensitive};
pub use walk::{walk_and_replace, WalkOptions};

// ============================================================================
// Types
// ============================================================================

/// The literal (old, new) pair driving all matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    old: String,
    new: String,
}

impl SearchSpec {
    /// Build a spec. An empty `old` is rejected: it would match everywhere.
    pub fn new(old: impl Into<String>, new: impl Into<String>) -> Result<Self> {
        let old = old.into();
        if old.is_empty() {
            return Err(Error::empty_search_term());
        }
        Ok(Self {
            old,
            new: new.into(),
        })
    }

    pub fn old(&self) -> &str {
        &self.old
    }

    pub fn new_text(&self) -> &str {
        &self.new
    }

    /// Apply this spec to a string.
    pub fn apply(&self, text: &str) -> ReplaceResult {
        replace_case_insensitive(text, &self.old, &self.new)
    }
}

/// Output of a single replace: the substituted text and the match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceResult {
    pub text: String,
    pub count: usize,
}

/// Per-file result reported and aggregated by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub content_replacements: usize,
    pub renamed: bool,
    pub new_path: PathBuf,
    pub name_replacements: usize,
}

impl FileOutcome {
    /// True when the file's content or name changed.
    pub fn changed(&self) -> bool {
        self.content_replacements > 0 || self.renamed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirOutcome {
    pub path: PathBuf,
    pub renamed: bool,
    pub new_path: PathBuf,
    pub name_replacements: usize,
}

/// Totals accumulated over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total_content_replacements: usize,
    pub total_name_replacements: usize,
}

impl RunSummary {
    pub fn record_file(&mut self, outcome: &FileOutcome) {
        self.total_content_replacements += outcome.content_replacements;
        self.total_name_replacements += outcome.name_replacements;
    }

    pub fn record_dir(&mut self, outcome: &DirOutcome) {
        self.total_name_replacements += outcome.name_replacements;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_spec_rejects_empty_old() {
        let err = SearchSpec::new("", "x").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn search_spec_allows_empty_new() {
        let spec = SearchSpec::new("old", "").unwrap();
        assert_eq!(spec.apply("an OLD word").text, "an  word");
    }

    #[test]
    fn summary_accumulates_files_and_dirs() {
        let mut summary = RunSummary::default();
        summary.record_file(&FileOutcome {
            path: PathBuf::from("a"),
            content_replacements: 2,
            renamed: true,
            new_path: PathBuf::from("b"),
            name_replacements: 1,
        });
        summary.record_dir(&DirOutcome {
            path: PathBuf::from("d"),
            renamed: true,
            new_path: PathBuf::from("e"),
            name_replacements: 3,
        });

        assert_eq!(summary.total_content_replacements, 2);
        assert_eq!(summary.total_name_replacements, 4);
    }
}
