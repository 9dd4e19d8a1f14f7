//! git command execution layer
//!
//! Builds git invocations, parses their output and coordinates the single
//! in-flight blame lookup.

pub mod constants;
mod executor;
mod lookup;
/// Parser module (public for integration testing)
pub mod parser;

pub use executor::GitExecutor;
pub use lookup::{BlameCoordinator, PendingBlame};

use std::path::PathBuf;
use thiserror::Error;

use crate::process::ProcessError;

/// Errors a blame lookup can end with
#[derive(Error, Debug)]
pub enum BlameError {
    /// Path is not absolute or does not name a file
    #[error("not a trackable file: {}", path.display())]
    NoTrackableFile { path: PathBuf },

    #[error("invalid line number {line} (lines are 1-based)")]
    InvalidLine { line: usize },

    /// git could not be started or printed nothing usable
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// The line belongs to a change that has not been committed
    #[error("change not committed yet")]
    UncommittedChange,

    #[error("malformed blame output: {0}")]
    MalformedOutput(String),

    /// A newer lookup started before this one finished
    #[error("lookup superseded by a newer request")]
    Superseded,
}

/// How loudly a failure should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl BlameError {
    pub fn severity(&self) -> Severity {
        match self {
            BlameError::UncommittedChange | BlameError::Superseded => Severity::Info,
            BlameError::Process(e) if e.is_no_output() => Severity::Warning,
            _ => Severity::Error,
        }
    }
}
