//! FakeGit helper for lookup coordination tests.
//!
//! A shell script standing in for git, so tests control timing and output.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// An executable `/bin/sh` script used as the git binary.
///
/// The script is removed when the FakeGit is dropped.
pub struct FakeGit {
    dir: TempDir,
}

impl FakeGit {
    /// Create a script whose body is `body` (run by /bin/sh with git's args).
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("git");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
        Self { dir }
    }

    /// A script that hangs for the blame of line 1 and answers every other
    /// line immediately with a record whose summary names the line.
    pub fn slow_first_line() -> Self {
        Self::with_first_line_hang("exec sleep 30")
    }

    /// Like [`slow_first_line`](Self::slow_first_line), but the hang runs in a
    /// forked child that shares the script's stdout instead of replacing it.
    pub fn slow_first_line_forked() -> Self {
        Self::with_first_line_hang("sleep 30; exit 0")
    }

    fn with_first_line_hang(hang: &str) -> Self {
        Self::new(&format!(
            r#"case "$*" in
  *"-L 1,1"*) {hang} ;;
esac
line=$(echo "$*" | sed -n 's/.*-L \([0-9]*\),.*/\1/p')
cat <<EOF
{record}
EOF"#,
            record = porcelain_record(&"b".repeat(40), "line $line")
        ))
    }

    /// A script that answers every blame immediately.
    pub fn instant() -> Self {
        Self::new(&format!(
            "cat <<'EOF'\n{}\nEOF",
            porcelain_record(&"a".repeat(40), "instant")
        ))
    }

    /// Program path to hand to `GitExecutor::with_program`.
    pub fn program(&self) -> String {
        self.dir.path().join("git").to_string_lossy().into_owned()
    }

    /// A path to blame (the fake never reads it).
    pub fn file(&self) -> PathBuf {
        self.dir.path().join("file.txt")
    }
}

/// A porcelain blame record for one line
pub fn porcelain_record(revision_id: &str, summary: &str) -> String {
    format!(
        "{revision_id} 1 1 1
author Fake Author
author-mail <fake@example.com>
author-time 1700000000
author-tz +0000
committer Fake Committer
committer-mail <fake@example.com>
committer-time 1700000000
committer-tz +0000
summary {summary}
filename file.txt
\tcontent"
    )
}
