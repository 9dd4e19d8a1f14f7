//! git command executor
//!
//! Builds git invocations and hands them to the process runner.

use std::ffi::OsStr;
use std::path::Path;

use super::BlameError;
use super::constants::{self, commands, env, flags, special};
use super::parser::Parser;
use crate::model::Upstream;
use crate::process::{PendingOutput, ProcessHandle, ProcessRunner};

/// Executor for git commands
#[derive(Debug, Clone)]
pub struct GitExecutor {
    /// git binary (name on PATH or full path)
    program: String,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor {
    /// Create an executor using `git` from PATH
    pub fn new() -> Self {
        Self {
            program: constants::GIT_COMMAND.to_string(),
        }
    }

    /// Create an executor for a specific git binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runner preconfigured for a working directory
    fn runner(&self, dir: &Path) -> ProcessRunner {
        let (key, value) = env::OPTIONAL_LOCKS;
        ProcessRunner::new(&self.program)
            .current_dir(dir)
            .env(key, value)
    }

    /// Start `git blame --porcelain -L <line>,<line> -- <file>` for one line
    ///
    /// `path` must be absolute; `line` is 1-based. The command runs in the
    /// file's directory. Nothing is spawned when validation fails.
    pub fn blame_line(
        &self,
        path: &Path,
        line: usize,
    ) -> Result<(ProcessHandle, PendingOutput), BlameError> {
        let (dir, file_name) = split_trackable(path)?;
        if line == 0 {
            return Err(BlameError::InvalidLine { line });
        }

        let range = format!("{line},{line}");
        let runner = self
            .runner(dir)
            .args([commands::BLAME, flags::PORCELAIN, flags::LINE_RANGE])
            .arg(&range)
            .arg(flags::END_OF_OPTIONS)
            .arg(file_name);

        crate::debug!("blame {}:{}", path.display(), line);
        Ok(runner.spawn()?)
    }

    /// Tracking branch of the checked-out branch in `dir`, if any
    pub fn upstream(&self, dir: &Path) -> Result<Option<Upstream>, BlameError> {
        require_absolute(dir)?;
        let output = self
            .runner(dir)
            .args([
                commands::REV_PARSE,
                flags::ABBREV_REF,
                flags::SYMBOLIC_FULL_NAME,
                flags::UPSTREAM,
            ])
            .run();
        Ok(absent_if_empty(output)?.and_then(|out| Parser::parse_upstream(&out)))
    }

    /// URL of `remote`, with any `.git` suffix removed
    pub fn remote_url(&self, dir: &Path, remote: &str) -> Result<Option<String>, BlameError> {
        require_absolute(dir)?;
        let output = self
            .runner(dir)
            .args([commands::LS_REMOTE, flags::GET_URL, remote])
            .run();
        Ok(absent_if_empty(output)?.and_then(|out| Parser::parse_remote_url(&out)))
    }

    /// URL of the upstream's remote, falling back to `origin`
    pub fn tracking_remote_url(&self, dir: &Path) -> Result<Option<String>, BlameError> {
        let remote = self
            .upstream(dir)?
            .map(|u| u.remote)
            .unwrap_or_else(|| special::DEFAULT_REMOTE.to_string());
        self.remote_url(dir, &remote)
    }
}

fn require_absolute(path: &Path) -> Result<(), BlameError> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(BlameError::NoTrackableFile {
            path: path.to_path_buf(),
        })
    }
}

/// Split an absolute file path into (containing directory, file name)
fn split_trackable(path: &Path) -> Result<(&Path, &OsStr), BlameError> {
    require_absolute(path)?;
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) => Ok((dir, name)),
        _ => Err(BlameError::NoTrackableFile {
            path: path.to_path_buf(),
        }),
    }
}

/// Companion lookups treat "printed nothing" as "not configured"
fn absent_if_empty(
    output: Result<String, crate::process::ProcessError>,
) -> Result<Option<String>, BlameError> {
    match output {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.is_no_output() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
