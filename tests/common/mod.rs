//! Common test utilities for integration tests.
//!
//! This module provides helpers for creating temporary git repositories and
//! fake git binaries.
//!
//! Note: Each integration test file compiles as a separate crate,
//! so not all helpers are used in every test file. We suppress
//! dead_code warnings at the module level.

#![allow(dead_code)]
#![allow(unused_imports)]

#[cfg(unix)]
pub mod fake_git;
pub mod test_repo;

#[cfg(unix)]
pub use fake_git::FakeGit;
pub use test_repo::TestRepo;

use std::process::{Command, Stdio};

/// Whether a usable `git` is on PATH
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

/// Return early from a test when git is not installed
#[allow(unused_macros)]
macro_rules! skip_if_no_git {
    () => {
        if !$crate::common::git_available() {
            eprintln!("Skipping test: git is not installed");
            return;
        }
    };
}
