use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{DirOutcome, FileOutcome, RunSummary};

/// Something observable that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplaceEvent {
    /// A file whose content or name changed.
    File(FileOutcome),
    /// A directory that was renamed.
    Dir(DirOutcome),
    ReadFailed { path: PathBuf, cause: String },
    WriteFailed { path: PathBuf, cause: String },
    RenameFailed { from: PathBuf, to: PathBuf, cause: String },
    ListFailed { path: PathBuf, cause: String },
    /// Emitted exactly once, after the walk.
    Summary(RunSummary),
}

impl ReplaceEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ReplaceEvent::ReadFailed { .. }
                | ReplaceEvent::WriteFailed { .. }
                | ReplaceEvent::RenameFailed { .. }
                | ReplaceEvent::ListFailed { .. }
        )
    }
}

impl fmt::Display for ReplaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplaceEvent::File(outcome) => write!(
                f,
                "[FILE] {} => content replacements: {}, name replacements: {}, renamed: {}",
                outcome.path.display(),
                outcome.content_replacements,
                outcome.name_replacements,
                outcome.renamed
            ),
            ReplaceEvent::Dir(outcome) => write!(
                f,
                "[DIR] {} => name replacements: {}, renamed: {}",
                outcome.path.display(),
                outcome.name_replacements,
                outcome.renamed
            ),
            ReplaceEvent::ReadFailed { path, cause } => {
                write!(f, "[FILE ERROR] Cannot read: {} ({})", path.display(), cause)
            }
            ReplaceEvent::WriteFailed { path, cause } => {
                write!(f, "[FILE ERROR] Cannot write: {} ({})", path.display(), cause)
            }
            ReplaceEvent::RenameFailed { from, to, cause } => write!(
                f,
                "[RENAME ERROR] {} -> {} ({})",
                from.display(),
                to.display(),
                cause
            ),
            ReplaceEvent::ListFailed { path, cause } => {
                write!(f, "[DIR ERROR] Cannot list: {} ({})", path.display(), cause)
            }
            ReplaceEvent::Summary(summary) => write!(
                f,
                "\n=== SUMMARY ===\nTotal content replacements: {}\nTotal name replacements (files + folders): {}",
                summary.total_content_replacements, summary.total_name_replacements
            ),
        }
    }
}

/// Sink for engine events. Keeps the engine free of console writes.
pub trait Reporter {
    fn record(&mut self, event: ReplaceEvent);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn record(&mut self, event: ReplaceEvent) {
        (**self).record(event)
    }
}

/// Writes one line per event as it happens.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn record(&mut self, event: ReplaceEvent) {
        // A closed pipe (`treeswap ... | head`) must not stop the run.
        let _ = writeln!(self.out, "{}", event);
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<ReplaceEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ReplaceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ReplaceEvent> {
        self.events
    }

    /// Rendered lines, as a console reporter would print them.
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReplaceEvent> {
        self.events.iter().filter(|e| e.is_failure())
    }
}

impl Reporter for RecordingReporter {
    fn record(&mut self, event: ReplaceEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_line_format() {
        let event = ReplaceEvent::File(FileOutcome {
            path: PathBuf::from("root/OldFile.txt"),
            content_replacements: 1,
            renamed: true,
            new_path: PathBuf::from("root/NewFile.txt"),
            name_replacements: 1,
        });
        assert_eq!(
            event.to_string(),
            "[FILE] root/OldFile.txt => content replacements: 1, name replacements: 1, renamed: true"
        );
    }

    #[test]
    fn dir_line_format() {
        let event = ReplaceEvent::Dir(DirOutcome {
            path: PathBuf::from("root/OldDir"),
            renamed: true,
            new_path: PathBuf::from("root/NewDir"),
            name_replacements: 1,
        });
        assert_eq!(
            event.to_string(),
            "[DIR] root/OldDir => name replacements: 1, renamed: true"
        );
    }

    #[test]
    fn failure_line_formats() {
        let read = ReplaceEvent::ReadFailed {
            path: PathBuf::from("a.bin"),
            cause: "bad utf-8".into(),
        };
        assert_eq!(read.to_string(), "[FILE ERROR] Cannot read: a.bin (bad utf-8)");

        let write = ReplaceEvent::WriteFailed {
            path: PathBuf::from("a.txt"),
            cause: "read-only".into(),
        };
        assert_eq!(write.to_string(), "[FILE ERROR] Cannot write: a.txt (read-only)");

        let rename = ReplaceEvent::RenameFailed {
            from: PathBuf::from("old.txt"),
            to: PathBuf::from("new.txt"),
            cause: "destination already exists".into(),
        };
        assert_eq!(
            rename.to_string(),
            "[RENAME ERROR] old.txt -> new.txt (destination already exists)"
        );
        assert!(rename.is_failure());
    }

    #[test]
    fn summary_block_format() {
        let event = ReplaceEvent::Summary(RunSummary {
            total_content_replacements: 4,
            total_name_replacements: 2,
        });
        assert_eq!(
            event.to_string(),
            "\n=== SUMMARY ===\nTotal content replacements: 4\nTotal name replacements (files + folders): 2"
        );
        assert!(!event.is_failure());
    }

    #[test]
    fn console_reporter_writes_one_line_per_event() {
        let mut reporter = ConsoleReporter::new(Vec::new());
        reporter.record(ReplaceEvent::ListFailed {
            path: PathBuf::from("locked"),
            cause: "Permission denied".into(),
        });
        reporter.record(ReplaceEvent::Summary(RunSummary::default()));

        let written = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(written.starts_with("[DIR ERROR] Cannot list: locked (Permission denied)\n"));
        assert!(written.ends_with("Total name replacements (files + folders): 0\n"));
    }

    #[test]
    fn recording_reporter_through_mut_ref() {
        fn emit<R: Reporter>(mut reporter: R) {
            reporter.record(ReplaceEvent::Summary(RunSummary::default()));
        }

        let mut recorder = RecordingReporter::new();
        emit(&mut recorder);
        assert_eq!(recorder.events().len(), 1);
        assert_eq!(recorder.failures().count(), 0);
    }
}
