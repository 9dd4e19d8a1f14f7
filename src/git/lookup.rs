//! Single in-flight blame lookup
//!
//! A newer request always wins: starting a lookup force-kills the previous
//! process, and every lookup carries the generation it was started in so a
//! late result from an older generation is discarded instead of returned.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::BlameError;
use super::executor::GitExecutor;
use super::parser::Parser;
use crate::model::Attribution;
use crate::process::{PendingOutput, ProcessError, ProcessHandle};

/// Owns the active blame process and the generation counter
#[derive(Debug)]
pub struct BlameCoordinator {
    git: GitExecutor,
    generation: Arc<AtomicU64>,
    active: Option<ProcessHandle>,
}

/// A started lookup, resolved with [`PendingBlame::wait`]
#[derive(Debug)]
pub struct PendingBlame {
    generation: u64,
    latest: Arc<AtomicU64>,
    output: PendingOutput,
}

impl BlameCoordinator {
    pub fn new(git: GitExecutor) -> Self {
        Self {
            git,
            generation: Arc::new(AtomicU64::new(0)),
            active: None,
        }
    }

    pub fn git(&self) -> &GitExecutor {
        &self.git
    }

    /// Current generation (bumped by every `start` and `cancel`)
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether the most recent lookup's process is still running
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.has_exited())
    }

    /// Supersede any previous lookup and start blaming `path:line`
    pub fn start(&mut self, path: &Path, line: usize) -> Result<PendingBlame, BlameError> {
        self.cancel();
        let generation = self.generation();

        let (handle, output) = self.git.blame_line(path, line)?;
        crate::debug!("lookup {} started (pid {})", generation, handle.id());
        self.active = Some(handle);

        Ok(PendingBlame {
            generation,
            latest: Arc::clone(&self.generation),
            output,
        })
    }

    /// Kill the active process and invalidate every outstanding lookup
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take()
            && let Err(e) = handle.kill()
        {
            crate::warn!("failed to kill {} (pid {}): {}", handle.program(), handle.id(), e);
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for BlameCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl PendingBlame {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True once a newer lookup has started (or the lookup was cancelled)
    pub fn is_stale(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.generation
    }

    /// Block until git finishes, then parse.
    ///
    /// Returns [`BlameError::Superseded`] if a newer lookup started in the
    /// meantime, whatever the process printed.
    pub fn wait(self) -> Result<Attribution, BlameError> {
        let PendingBlame {
            generation,
            latest,
            output,
        } = self;
        finish(generation, &latest, output.wait())
    }

    /// Non-blocking variant of [`wait`](Self::wait) for event-loop hosts.
    ///
    /// `None` while git is still running. Like the underlying process result,
    /// the outcome is handed out once.
    pub fn try_wait(&self) -> Option<Result<Attribution, BlameError>> {
        let output = self.output.try_wait()?;
        Some(finish(self.generation, &self.latest, output))
    }
}

/// Discard the result of a stale generation, otherwise parse it
fn finish(
    generation: u64,
    latest: &AtomicU64,
    output: Result<String, ProcessError>,
) -> Result<Attribution, BlameError> {
    if latest.load(Ordering::SeqCst) != generation {
        crate::debug!("lookup {} superseded, result discarded", generation);
        return Err(BlameError::Superseded);
    }
    Parser::parse_porcelain(&output?)
}
