//! Single process runner
//!
//! Each [`ProcessRunner::spawn`] call starts exactly one OS process. Standard
//! output is read on a background thread and accumulated into one buffer;
//! standard error is drained separately and only kept for diagnostics.
//!
//! The result follows the process, not its pipes: once the process is reaped
//! the readers get [`OUTPUT_GRACE`] to hit EOF. A grandchild that inherited
//! stdout cannot keep the result pending after that. On unix the child leads
//! its own process group and [`ProcessHandle::kill`] signals the whole group.

use std::ffi::{OsStr, OsString};
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use super::ProcessError;

/// How often the reaper polls for exit
const REAP_INTERVAL: Duration = Duration::from_millis(5);

/// How long pipes may stay open after the process was reaped
pub const OUTPUT_GRACE: Duration = Duration::from_millis(500);

const READ_CHUNK: usize = 8 * 1024;

/// Builder for one external command invocation
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    envs: Vec<(OsString, OsString)>,
}

/// Handle to a running process, used to terminate it early
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    program: String,
    pid: u32,
    child: Arc<Mutex<Child>>,
}

/// Deferred result of a spawned process
///
/// Resolves once the process has terminated: `Ok(text)` when stdout was
/// non-empty, `Err(ProcessError::NoOutput)` otherwise.
#[derive(Debug)]
pub struct PendingOutput {
    receiver: Receiver<Result<String, ProcessError>>,
}

/// Background reader for one pipe
struct Drain {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Receiver<io::Result<()>>,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Working directory for the child (defaults to the caller's)
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Extra environment variable for the child
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Start the process.
    ///
    /// Spawn failures are returned immediately; everything after that is
    /// reported through the returned [`PendingOutput`].
    pub fn spawn(&self) -> Result<(ProcessHandle, PendingOutput), ProcessError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let pid = child.id();
        crate::debug!("spawned {} (pid {}) args={:?}", self.program, pid, self.args);

        let stdout = child.stdout.take().map(Drain::spawn);
        let stderr = child.stderr.take().map(Drain::spawn);

        let child = Arc::new(Mutex::new(child));
        let (sender, receiver) = mpsc::channel();

        let reaped = Arc::clone(&child);
        let program = self.program.clone();
        thread::spawn(move || {
            let result = collect(&program, stdout, &reaped, stderr);
            // The receiver may already be gone if the caller lost interest
            let _ = sender.send(result);
        });

        Ok((
            ProcessHandle {
                program: self.program.clone(),
                pid,
                child,
            },
            PendingOutput { receiver },
        ))
    }

    /// Spawn and block until the process terminates
    pub fn run(&self) -> Result<String, ProcessError> {
        let (_handle, pending) = self.spawn()?;
        pending.wait()
    }

    fn spawn_error(&self, e: io::Error) -> ProcessError {
        // A missing working directory also surfaces as NotFound
        let dir_ok = self.current_dir.as_ref().is_none_or(|dir| dir.is_dir());
        if e.kind() == io::ErrorKind::NotFound && dir_ok {
            ProcessError::NotFound {
                program: self.program.clone(),
            }
        } else {
            ProcessError::Spawn {
                program: self.program.clone(),
                source: e,
            }
        }
    }
}

/// Reap the child, then collect what its pipes delivered
fn collect(
    program: &str,
    stdout: Option<Drain>,
    child: &Mutex<Child>,
    stderr: Option<Drain>,
) -> Result<String, ProcessError> {
    let status = reap(child)?;
    let deadline = Instant::now() + OUTPUT_GRACE;

    let (buffer, read) = match stdout {
        Some(drain) => drain.finish(program, deadline),
        None => (Vec::new(), Ok(())),
    };
    let stderr = stderr
        .map(|drain| String::from_utf8_lossy(&drain.finish(program, deadline).0).into_owned())
        .unwrap_or_default();
    if !stderr.is_empty() {
        crate::debug!("{} stderr (discarded): {}", program, stderr.trim_end());
    }
    read?;

    crate::debug!(
        "{} exited with {:?}, {} bytes of output",
        program,
        status.code(),
        buffer.len()
    );

    if buffer.is_empty() {
        return Err(ProcessError::NoOutput {
            program: program.to_string(),
            exit_code: status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

impl Drain {
    fn spawn(pipe: impl Read + Send + 'static) -> Self {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (sender, done) = mpsc::channel();
        let shared = Arc::clone(&buffer);
        thread::spawn(move || {
            let _ = sender.send(read_chunks(pipe, &shared));
        });
        Self { buffer, done }
    }

    /// Wait for EOF until `deadline`, then take whatever was read so far.
    ///
    /// Past the deadline the reader thread is left to finish on its own.
    fn finish(self, program: &str, deadline: Instant) -> (Vec<u8>, io::Result<()>) {
        let timeout = deadline.saturating_duration_since(Instant::now());
        let read = match self.done.recv_timeout(timeout) {
            Ok(read) => read,
            Err(RecvTimeoutError::Timeout) => {
                crate::warn!("{} exited but its pipe is still open, output cut off", program);
                Ok(())
            }
            Err(RecvTimeoutError::Disconnected) => Ok(()),
        };
        let mut guard = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        (std::mem::take(&mut *guard), read)
    }
}

fn read_chunks(mut pipe: impl Read, buffer: &Mutex<Vec<u8>>) -> io::Result<()> {
    let mut chunk = [0u8; READ_CHUNK];
    loop {
        match pipe.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Poll for exit without holding the lock, so `kill()` is never blocked
fn reap(child: &Mutex<Child>) -> io::Result<ExitStatus> {
    loop {
        {
            let mut guard = child.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(status) = guard.try_wait()? {
                return Ok(status);
            }
        }
        thread::sleep(REAP_INTERVAL);
    }
}

impl ProcessHandle {
    /// OS process id
    pub fn id(&self) -> u32 {
        self.pid
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the process has terminated
    pub fn has_exited(&self) -> bool {
        let mut guard = self.child.lock().unwrap_or_else(PoisonError::into_inner);
        matches!(guard.try_wait(), Ok(Some(_)))
    }

    /// Forcibly terminate the process and, on unix, everything it forked
    /// (SIGKILL to its process group).
    ///
    /// Killing a process that already exited is not an error.
    pub fn kill(&self) -> io::Result<()> {
        let mut guard = self.child.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.try_wait()?.is_some() {
            return Ok(());
        }
        crate::debug!("killing {} (pid {})", self.program, self.pid);
        #[cfg(unix)]
        {
            // Unreaped, so the group id is still ours
            kill_group(self.pid)
        }
        #[cfg(not(unix))]
        {
            guard.kill()
        }
    }
}

#[cfg(unix)]
fn kill_group(pgid: u32) -> io::Result<()> {
    let pgid = libc::pid_t::try_from(pgid).map_err(io::Error::other)?;
    // Negative pid addresses the process group
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

impl PendingOutput {
    /// Block until the process terminates
    pub fn wait(self) -> Result<String, ProcessError> {
        self.receiver
            .recv()
            .unwrap_or(Err(ProcessError::Disconnected))
    }

    /// Non-blocking poll. `None` while the process is still running.
    ///
    /// The result is handed out once; polling again afterwards yields
    /// `Some(Err(ProcessError::Disconnected))`.
    pub fn try_wait(&self) -> Option<Result<String, ProcessError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ProcessError::Disconnected)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_builder_collects_args() {
        let runner = ProcessRunner::new("git")
            .arg("blame")
            .args(["--porcelain", "-L", "3,3"])
            .current_dir("/tmp")
            .env("GIT_PAGER", "cat");

        assert_eq!(runner.program(), "git");
        assert_eq!(runner.args.len(), 4);
        assert_eq!(runner.current_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(runner.envs.len(), 1);
    }

    #[test]
    fn test_read_chunks_accumulates() {
        let buffer = Mutex::new(Vec::new());
        read_chunks("abc".as_bytes().chain("def".as_bytes()), &buffer).unwrap();
        assert_eq!(*buffer.lock().unwrap(), b"abcdef");
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let result = ProcessRunner::new("blameline-definitely-missing-binary").spawn();
        match result {
            Err(ProcessError::NotFound { program }) => {
                assert_eq!(program, "blameline-definitely-missing-binary")
            }
            other => panic!("Expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_working_dir_is_spawn_error() {
        let result = ProcessRunner::new("blameline-definitely-missing-binary")
            .current_dir("/nonexistent/blameline/dir")
            .spawn();
        assert!(matches!(result, Err(ProcessError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_returned_verbatim() {
        let output = ProcessRunner::new("sh")
            .args(["-c", "printf abc"])
            .run()
            .unwrap();
        assert_eq!(output, "abc");
    }

    #[cfg(unix)]
    #[test]
    fn test_empty_output_is_no_output() {
        let err = ProcessRunner::new("sh")
            .args(["-c", "exit 3"])
            .run()
            .unwrap_err();
        match err {
            ProcessError::NoOutput { exit_code, .. } => assert_eq!(exit_code, Some(3)),
            other => panic!("Expected NoOutput, got {:?}", other),
        }
    }
}
