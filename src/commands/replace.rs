use clap::Args;
use serde::Serialize;
use std::io;
use std::path::Path;

use treeswap::config::TreeswapConfig;
use treeswap::replace::{
    self, ConsoleReporter, DirOutcome, FileOutcome, RecordingReporter, ReplaceEvent, Reporter,
    RunSummary, SearchSpec, WalkOptions,
};
use treeswap::{log_status, validation};

use crate::commands::CmdResult;

#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Root directory to start from
    pub directory: String,
    /// Word to search for (case-insensitive)
    pub old_word: String,
    /// Word to replace with
    pub new_word: String,
    /// Directory name to leave alone, at any depth (repeatable)
    #[arg(long = "skip-dir", value_name = "NAME")]
    pub skip_dirs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReplaceOutput {
    pub root: String,
    pub old: String,
    pub new: String,
    pub summary: RunSummary,
    pub files: Vec<FileOutcome>,
    pub dirs: Vec<DirOutcome>,
    pub errors: Vec<String>,
}

/// Streams events to stdout in text mode and always keeps a copy for the output.
struct CliReporter {
    console: Option<ConsoleReporter<io::Stdout>>,
    recorder: RecordingReporter,
}

impl Reporter for CliReporter {
    fn record(&mut self, event: ReplaceEvent) {
        if let Some(console) = self.console.as_mut() {
            console.record(event.clone());
        }
        self.recorder.record(event);
    }
}

pub fn run(args: ReplaceArgs, config: &TreeswapConfig, json: bool) -> CmdResult<ReplaceOutput> {
    let root = validation::require_directory(&args.directory)?;
    let spec = SearchSpec::new(&args.old_word, &args.new_word)?;

    let mut skip_dirs = config.defaults.skip_dirs.clone();
    skip_dirs.extend(args.skip_dirs);
    let options = WalkOptions { skip_dirs };

    log_status!(
        "replace",
        "'{}' -> '{}' under {}",
        spec.old(),
        spec.new_text(),
        root.display()
    );

    let mut reporter = CliReporter {
        console: (!json).then(ConsoleReporter::stdout),
        recorder: RecordingReporter::new(),
    };
    let summary = replace::walk_and_replace(&root, &spec, &options, &mut reporter);

    Ok((
        build_output(&root, &spec, summary, reporter.recorder.into_events()),
        0,
    ))
}

fn build_output(
    root: &Path,
    spec: &SearchSpec,
    summary: RunSummary,
    events: Vec<ReplaceEvent>,
) -> ReplaceOutput {
    let mut output = ReplaceOutput {
        root: root.display().to_string(),
        old: spec.old().to_string(),
        new: spec.new_text().to_string(),
        summary,
        files: Vec::new(),
        dirs: Vec::new(),
        errors: Vec::new(),
    };

    for event in events {
        match event {
            ReplaceEvent::File(outcome) => output.files.push(outcome),
            ReplaceEvent::Dir(outcome) => output.dirs.push(outcome),
            ReplaceEvent::Summary(_) => {}
            failure => output.errors.push(failure.to_string()),
        }
    }

    output
}
