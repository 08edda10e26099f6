// Public modules
pub mod config;
pub mod error;
pub mod replace;

// Internal modules - not part of public API
pub(crate) mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use replace::{
    walk_and_replace, DirOutcome, FileOutcome, ReplaceResult, RunSummary, SearchSpec,
    WalkOptions,
};
