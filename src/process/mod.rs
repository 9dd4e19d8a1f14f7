//! External process execution
//!
//! Spawns one command, buffers its standard output and hands back a kill
//! handle plus a deferred result.

mod runner;

pub use runner::{OUTPUT_GRACE, PendingOutput, ProcessHandle, ProcessRunner};

use std::io;
use thiserror::Error;

/// Why a process did not produce usable output
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{program} is not installed or not in PATH")]
    NotFound { program: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Exited (or was killed) without writing anything to stdout.
    /// `exit_code` is `None` when the process was terminated by a signal.
    #[error("{program} produced no output (exit code {exit_code:?})")]
    NoOutput {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("process result was lost before completion")]
    Disconnected,
}

impl ProcessError {
    /// True for the plain "ran but printed nothing" case
    pub fn is_no_output(&self) -> bool {
        matches!(self, ProcessError::NoOutput { .. })
    }
}
