//! Runtime configuration
//!
//! Defaults live here; the CLI overrides them from flags and environment.

use std::path::PathBuf;

use crate::format::{
    DEFAULT_INLINE_TEMPLATE, DEFAULT_STATUS_TEMPLATE, English, MessageFormatter, Numeric,
};
use crate::git::{BlameCoordinator, GitExecutor, constants};

/// Default cap for inline annotations, in characters
pub const DEFAULT_MAX_LENGTH: usize = 80;

#[derive(Debug, Clone)]
pub struct Config {
    /// git binary
    pub git_program: String,
    /// Template for the status message
    pub status_template: String,
    /// Template for inline annotations
    pub inline_template: String,
    /// Relative time phrasing
    pub numeric: Numeric,
    /// Truncate rendered messages (None = unlimited)
    pub max_length: Option<usize>,
    /// Debug log destination (None = logging off)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_program: constants::GIT_COMMAND.to_string(),
            status_template: DEFAULT_STATUS_TEMPLATE.to_string(),
            inline_template: DEFAULT_INLINE_TEMPLATE.to_string(),
            numeric: Numeric::default(),
            max_length: Some(DEFAULT_MAX_LENGTH),
            log_file: None,
        }
    }
}

impl Config {
    pub fn git(&self) -> GitExecutor {
        GitExecutor::with_program(&self.git_program)
    }

    pub fn coordinator(&self) -> BlameCoordinator {
        BlameCoordinator::new(self.git())
    }

    /// Formatter for the status message, or the inline annotation when `inline`
    pub fn formatter(&self, inline: bool) -> MessageFormatter<English> {
        let template = if inline {
            &self.inline_template
        } else {
            &self.status_template
        };
        let formatter = MessageFormatter::new(template.as_str(), English::new(self.numeric));
        match self.max_length {
            Some(max) => formatter.with_max_length(max),
            None => formatter,
        }
    }
}
