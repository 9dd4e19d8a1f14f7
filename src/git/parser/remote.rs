//! Remote lookup parsers (rev-parse @{u}, ls-remote --get-url)

use super::super::constants::special;
use super::Parser;
use crate::model::Upstream;

impl Parser {
    /// Parse `git rev-parse --abbrev-ref --symbolic-full-name @{u}` output
    ///
    /// `origin/feature/x` -> remote `origin`, branch `feature/x`.
    pub fn parse_upstream(output: &str) -> Option<Upstream> {
        let name = output.lines().next()?.trim();
        let (remote, branch) = name.split_once('/')?;
        if remote.is_empty() || branch.is_empty() {
            return None;
        }
        Some(Upstream {
            remote: remote.to_string(),
            branch: branch.to_string(),
        })
    }

    /// Parse `git ls-remote --get-url <remote>` output, dropping a `.git` suffix
    pub fn parse_remote_url(output: &str) -> Option<String> {
        let url = output.lines().next()?.trim();
        if url.is_empty() {
            return None;
        }
        let url = url.strip_suffix(special::GIT_SUFFIX).unwrap_or(url);
        Some(url.to_string())
    }
}
