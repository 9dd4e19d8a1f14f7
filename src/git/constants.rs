//! git-specific constants
//!
//! Centralized definitions for git command names, flags, porcelain keys and
//! special values.

/// git command binary name
pub const GIT_COMMAND: &str = "git";

/// git subcommands
pub mod commands {
    pub const BLAME: &str = "blame";
    pub const REV_PARSE: &str = "rev-parse";
    pub const LS_REMOTE: &str = "ls-remote";
}

/// git command flags
pub mod flags {
    /// Machine-readable blame output
    pub const PORCELAIN: &str = "--porcelain";
    /// Line range (`-L <start>,<end>`)
    pub const LINE_RANGE: &str = "-L";
    /// Everything after this is a path
    pub const END_OF_OPTIONS: &str = "--";
    pub const ABBREV_REF: &str = "--abbrev-ref";
    pub const SYMBOLIC_FULL_NAME: &str = "--symbolic-full-name";
    /// Upstream of the current branch
    pub const UPSTREAM: &str = "@{u}";
    pub const GET_URL: &str = "--get-url";
}

/// Environment passed to every git invocation
pub mod env {
    /// Background lookups must not take optional locks (e.g. index refresh)
    pub const OPTIONAL_LOCKS: (&str, &str) = ("GIT_OPTIONAL_LOCKS", "0");
}

/// Keys of the porcelain blame record, in output order after the header
pub mod porcelain {
    pub const AUTHOR: &str = "author";
    pub const AUTHOR_MAIL: &str = "author-mail";
    pub const AUTHOR_TIME: &str = "author-time";
    pub const AUTHOR_TZ: &str = "author-tz";
    pub const COMMITTER: &str = "committer";
    pub const COMMITTER_MAIL: &str = "committer-mail";
    pub const COMMITTER_TIME: &str = "committer-time";
    pub const COMMITTER_TZ: &str = "committer-tz";
    pub const SUMMARY: &str = "summary";
}

/// Special git values
pub mod special {
    /// Revision id git reports for lines that are not committed yet
    pub const UNCOMMITTED_REVISION: &str = "0000000000000000000000000000000000000000";

    /// Hex length of a SHA-1 object id
    pub const SHA1_HEX_LEN: usize = 40;

    /// Hex length of a SHA-256 object id
    pub const SHA256_HEX_LEN: usize = 64;

    /// Remote used when the branch has no upstream
    pub const DEFAULT_REMOTE: &str = "origin";

    /// Suffix stripped from remote URLs
    pub const GIT_SUFFIX: &str = ".git";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncommitted_revision_is_all_zero() {
        assert!(special::UNCOMMITTED_REVISION.chars().all(|c| c == '0'));
        assert_eq!(special::UNCOMMITTED_REVISION.len(), special::SHA1_HEX_LEN);
    }

    #[test]
    fn test_git_command_name() {
        assert_eq!(GIT_COMMAND, "git");
    }
}
