use std::path::{Path, PathBuf};

use super::report::{ReplaceEvent, Reporter};
use super::text::contains_case_insensitive;
use super::SearchSpec;
use crate::utils::io;

/// Result of trying to rename one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Where the entry lives now: the new path on success, the original otherwise.
    pub path: PathBuf,
    pub renamed: bool,
    pub count: usize,
}

impl RenameOutcome {
    fn unchanged(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            renamed: false,
            count: 0,
        }
    }
}

/// Rename `path` if its final segment contains the search term.
///
/// Only the last segment is rewritten; parent components are never touched.
/// Entries without a match cost one string check and no filesystem call.
/// A failed rename (collision, permissions, cross-device) is reported and the
/// original path comes back with `renamed == false` and a count of 0.
pub fn rename_entry<R: Reporter + ?Sized>(
    path: &Path,
    spec: &SearchSpec,
    reporter: &mut R,
) -> RenameOutcome {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return RenameOutcome::unchanged(path);
    };

    if !contains_case_insensitive(name, spec.old()) {
        return RenameOutcome::unchanged(path);
    }

    let result = spec.apply(name);
    let new_path = match path.parent() {
        Some(parent) => parent.join(&result.text),
        None => PathBuf::from(&result.text),
    };

    if new_path == path {
        return RenameOutcome::unchanged(path);
    }

    let operation = format!("rename {} -> {}", path.display(), new_path.display());
    match io::rename_path(path, &new_path, &operation) {
        Ok(()) => RenameOutcome {
            path: new_path,
            renamed: true,
            count: result.count,
        },
        Err(err) => {
            reporter.record(ReplaceEvent::RenameFailed {
                from: path.to_path_buf(),
                to: new_path,
                cause: err.cause().to_string(),
            });
            RenameOutcome::unchanged(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replace::RecordingReporter;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn renames_file_segment_case_insensitively() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("OldFile.txt");
        fs::write(&path, "x").unwrap();

        let spec = SearchSpec::new("old", "New").unwrap();
        let mut reporter = RecordingReporter::new();
        let outcome = rename_entry(&path, &spec, &mut reporter);

        assert_eq!(outcome.path, dir.path().join("NewFile.txt"));
        assert!(outcome.renamed);
        assert_eq!(outcome.count, 1);
        assert!(!path.exists());
        assert!(outcome.path.exists());
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn counts_every_match_in_segment() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old_OLD_old");
        fs::create_dir(&path).unwrap();

        let spec = SearchSpec::new("old", "new").unwrap();
        let outcome = rename_entry(&path, &spec, &mut RecordingReporter::new());

        assert_eq!(outcome.path, dir.path().join("new_new_new"));
        assert_eq!(outcome.count, 3);
        assert!(outcome.path.is_dir());
    }

    #[test]
    fn parent_components_are_never_rewritten() {
        let dir = TempDir::new().unwrap();
        let parent = dir.path().join("old_parent");
        fs::create_dir(&parent).unwrap();
        let path = parent.join("old.txt");
        fs::write(&path, "").unwrap();

        let spec = SearchSpec::new("old", "new").unwrap();
        let outcome = rename_entry(&path, &spec, &mut RecordingReporter::new());

        assert_eq!(outcome.path, parent.join("new.txt"));
        assert!(parent.exists());
    }

    #[test]
    fn no_match_performs_no_filesystem_operation() {
        // The path does not exist; touching the filesystem would fail loudly.
        let path = Path::new("/nonexistent/treeswap/readme.md");

        let spec = SearchSpec::new("old", "new").unwrap();
        let mut reporter = RecordingReporter::new();
        let outcome = rename_entry(path, &spec, &mut reporter);

        assert_eq!(outcome, RenameOutcome::unchanged(path));
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn identical_result_is_a_noop() {
        let path = Path::new("/nonexistent/treeswap/same.txt");

        let spec = SearchSpec::new("same", "same").unwrap();
        let mut reporter = RecordingReporter::new();
        let outcome = rename_entry(path, &spec, &mut reporter);

        assert!(!outcome.renamed);
        assert_eq!(outcome.count, 0);
        assert!(reporter.events().is_empty());
    }

    #[test]
    fn collision_is_reported_and_original_kept() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        fs::write(&from, "from").unwrap();
        fs::write(&to, "to").unwrap();

        let spec = SearchSpec::new("old", "new").unwrap();
        let mut reporter = RecordingReporter::new();
        let outcome = rename_entry(&from, &spec, &mut reporter);

        assert_eq!(outcome, RenameOutcome::unchanged(&from));
        assert_eq!(fs::read_to_string(&to).unwrap(), "to");
        assert_eq!(
            reporter.lines(),
            vec![format!(
                "[RENAME ERROR] {} -> {} (destination already exists)",
                from.display(),
                to.display()
            )]
        );
    }

    #[test]
    fn missing_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("old_missing.txt");

        let spec = SearchSpec::new("old", "new").unwrap();
        let mut reporter = RecordingReporter::new();
        let outcome = rename_entry(&path, &spec, &mut reporter);

        assert!(!outcome.renamed);
        assert_eq!(reporter.failures().count(), 1);
    }
}
