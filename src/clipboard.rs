//! Clipboard utilities for copying revision ids
//!
//! Detects available clipboard tools and copies text to the system clipboard.
//! Detection order: pbcopy (macOS) → wl-copy (Wayland) → xclip (X11) → xsel (X11 fallback)

use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard tool found (install pbcopy, xclip or wl-copy)")]
    NoTool,

    #[error("failed to run {program}: {source}")]
    Io {
        program: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Candidate commands in priority order
const TOOLS: &[&[&str]] = &[
    &["pbcopy"],
    &["wl-copy"],
    &["xclip", "-selection", "clipboard"],
    &["xsel", "--clipboard", "--input"],
];

/// Copy text to the system clipboard using the first tool that works
pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    for cmd_args in TOOLS {
        let program = cmd_args[0];
        if !is_available(program) {
            continue;
        }

        let io_err = |source| ClipboardError::Io { program, source };

        let mut child = Command::new(program)
            .args(&cmd_args[1..])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(io_err)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(io_err)?;
        }

        let status = child.wait().map_err(io_err)?;
        if status.success() {
            crate::debug!("copied {} bytes with {}", text.len(), program);
            return Ok(());
        }
        crate::warn!("{} exited with {:?}", program, status.code());
    }

    Err(ClipboardError::NoTool)
}

/// Check if a command is available on the system
fn is_available(program: &str) -> bool {
    Command::new("which")
        .arg(program)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_list_order() {
        assert_eq!(TOOLS[0], &["pbcopy"]);
        assert!(TOOLS.iter().all(|cmd| !cmd.is_empty()));
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        assert!(!is_available("blameline-no-such-clipboard-tool"));
    }
}
