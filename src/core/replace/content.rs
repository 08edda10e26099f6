use std::fs;
use std::path::Path;

use super::report::{ReplaceEvent, Reporter};
use super::SearchSpec;
use crate::utils::io;

/// Rewrite matches inside one file and return how many were replaced.
///
/// Files without a match are never written. Read and write failures are
/// reported and count as 0; they never propagate. The write is a plain
/// overwrite, so a crash mid-write can leave the file partially rewritten.
pub fn replace_in_file<R: Reporter + ?Sized>(
    path: &Path,
    spec: &SearchSpec,
    reporter: &mut R,
) -> usize {
    // Pipes, sockets and devices are renamed like files but never read.
    if let Ok(metadata) = fs::metadata(path) {
        if !metadata.is_file() {
            return 0;
        }
    }

    let content = match io::read_file(path, &format!("read {}", path.display())) {
        Ok(content) => content,
        Err(err) => {
            reporter.record(ReplaceEvent::ReadFailed {
                path: path.to_path_buf(),
                cause: err.cause().to_string(),
            });
            return 0;
        }
    };

    let result = spec.apply(&content);
    if result.count == 0 {
        return 0;
    }

    if let Err(err) = io::write_file(path, &result.text, &format!("write {}", path.display())) {
        reporter.record(ReplaceEvent::WriteFailed {
            path: path.to_path_buf(),
            cause: err.cause().to_string(),
        });
        return 0;
    }

    result.count
}
