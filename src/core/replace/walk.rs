use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use super::content::replace_in_file;
use super::rename::rename_entry;
use super::report::{ReplaceEvent, Reporter};
use super::{DirOutcome, FileOutcome, RunSummary, SearchSpec};

/// Knobs for a walk. The default walks the entire subtree.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Directory names that are neither descended into nor renamed, at any depth.
    pub skip_dirs: Vec<String>,
}

impl WalkOptions {
    fn skips(&self, name: &OsStr) -> bool {
        name.to_str()
            .is_some_and(|name| self.skip_dirs.iter().any(|skip| skip == name))
    }
}

/// Replace `spec` across the tree under `root` and return the totals.
///
/// The walk is post-order: every subdirectory is fully processed, its own
/// rename included, before the files of its parent are touched and before the
/// parent itself is considered for renaming. `root` itself is never renamed.
/// Nothing here fails; every per-entry problem becomes an event. The summary
/// event is recorded exactly once, at the end.
pub fn walk_and_replace<R: Reporter + ?Sized>(
    root: &Path,
    spec: &SearchSpec,
    options: &WalkOptions,
    reporter: &mut R,
) -> RunSummary {
    let mut summary = RunSummary::default();
    walk_dir(root, spec, options, reporter, &mut summary);
    reporter.record(ReplaceEvent::Summary(summary));
    summary
}

struct Subdir {
    path: PathBuf,
    /// False for symlinks to directories: renamed, never followed.
    descend: bool,
}

#[derive(Default)]
struct Listing {
    files: Vec<PathBuf>,
    dirs: Vec<Subdir>,
}

fn walk_dir<R: Reporter + ?Sized>(
    dir: &Path,
    spec: &SearchSpec,
    options: &WalkOptions,
    reporter: &mut R,
    summary: &mut RunSummary,
) {
    let Some(listing) = list_dir(dir, options, reporter) else {
        return;
    };

    for subdir in listing.dirs.iter().filter(|d| d.descend) {
        walk_dir(&subdir.path, spec, options, reporter, summary);
    }

    for file in &listing.files {
        let content_replacements = replace_in_file(file, spec, reporter);
        let rename = rename_entry(file, spec, reporter);

        let outcome = FileOutcome {
            path: file.clone(),
            content_replacements,
            renamed: rename.renamed,
            new_path: rename.path,
            name_replacements: rename.count,
        };
        summary.record_file(&outcome);
        if outcome.changed() {
            reporter.record(ReplaceEvent::File(outcome));
        }
    }

    for subdir in &listing.dirs {
        let rename = rename_entry(&subdir.path, spec, reporter);
        if !rename.renamed {
            continue;
        }

        let outcome = DirOutcome {
            path: subdir.path.clone(),
            renamed: true,
            new_path: rename.path,
            name_replacements: rename.count,
        };
        summary.record_dir(&outcome);
        reporter.record(ReplaceEvent::Dir(outcome));
    }
}

/// Snapshot a directory's children before anything in it is renamed.
///
/// An unlistable directory is reported and yields `None`, which skips its
/// subtree. Entries are sorted by name so runs are repeatable.
fn list_dir<R: Reporter + ?Sized>(
    dir: &Path,
    options: &WalkOptions,
    reporter: &mut R,
) -> Option<Listing> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) => {
            reporter.record(ReplaceEvent::ListFailed {
                path: dir.to_path_buf(),
                cause: err.to_string(),
            });
            return None;
        }
    };

    let mut entries = Vec::new();
    for entry in read_dir {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => reporter.record(ReplaceEvent::ListFailed {
                path: dir.to_path_buf(),
                cause: err.to_string(),
            }),
        }
    }
    entries.sort_by_key(|entry| entry.file_name());

    let mut listing = Listing::default();
    for entry in entries {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                reporter.record(ReplaceEvent::ListFailed {
                    path,
                    cause: err.to_string(),
                });
                continue;
            }
        };

        let is_dir_link = file_type.is_symlink()
            && fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);

        if file_type.is_dir() || is_dir_link {
            if options.skips(&entry.file_name()) {
                continue;
            }
            listing.dirs.push(Subdir {
                path,
                descend: !is_dir_link,
            });
        } else {
            listing.files.push(path);
        }
    }

    Some(listing)
}
