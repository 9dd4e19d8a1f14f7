//! TestRepo helper for integration tests.
//!
//! Provides a temporary git repository with a fixed identity.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

pub const USER_NAME: &str = "Test User";
pub const USER_EMAIL: &str = "test@example.com";

/// A temporary git repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new git repository in a temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };

        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", USER_NAME]);
        repo.git(&["config", "user.email", USER_EMAIL]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Get the path to the repository root (canonicalized, always absolute).
    pub fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize repo path")
    }

    /// Absolute path of a file inside the repository.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Execute a git command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn git(&self, args: &[&str]) -> String {
        self.git_with_env(args, &[])
    }

    fn git_with_env(&self, args: &[&str], envs: &[(&str, &str)]) -> String {
        let output = Command::new("git")
            .args(args)
            .envs(envs.iter().copied())
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Write, stage and commit a file with author and committer date `timestamp`.
    pub fn commit_file_at(&self, name: &str, content: &str, message: &str, timestamp: i64) {
        self.write_file(name, content);
        self.git(&["add", name]);
        let date = format!("@{timestamp} +0000");
        self.git_with_env(
            &["commit", "-q", "-m", message],
            &[
                ("GIT_AUTHOR_DATE", date.as_str()),
                ("GIT_COMMITTER_DATE", date.as_str()),
            ],
        );
    }

    /// Full hash of HEAD.
    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"]).trim().to_string()
    }

    /// Name of the checked-out branch.
    pub fn current_branch(&self) -> String {
        self.git(&["symbolic-ref", "--short", "HEAD"])
            .trim()
            .to_string()
    }

    /// Add a remote to this repository.
    pub fn add_remote(&self, name: &str, url: &str) {
        self.git(&["remote", "add", name, url]);
    }

    /// Make the current branch track `<remote>/<branch>` (pointing at HEAD).
    pub fn track(&self, remote: &str, branch: &str) {
        let tracking_ref = format!("refs/remotes/{remote}/{branch}");
        self.git(&["update-ref", &tracking_ref, "HEAD"]);
        let upstream = format!("{remote}/{branch}");
        self.git(&["branch", "--set-upstream-to", &upstream]);
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
