//! Porcelain blame parser (git blame --porcelain -L n,n)

use super::super::BlameError;
use super::super::constants::{porcelain, special};
use super::Parser;
use crate::model::{Attribution, Identity};

impl Parser {
    /// Parse the porcelain blame record of exactly one line.
    ///
    /// ```text
    /// <revision-id> <orig-line> <final-line> <count>
    /// author <name>
    /// author-mail <email>
    /// author-time <unix-seconds>
    /// author-tz <tz>
    /// committer <name>
    /// committer-mail <email>
    /// committer-time <unix-seconds>
    /// committer-tz <tz>
    /// summary <text>
    /// ```
    ///
    /// The layout is positional: each value is whatever follows the first
    /// space of its line. Lines after `summary` are ignored. The all-zero
    /// revision id is reported as [`BlameError::UncommittedChange`] before any
    /// other line is looked at.
    pub fn parse_porcelain(output: &str) -> Result<Attribution, BlameError> {
        let mut lines = output.lines().map(|l| l.strip_suffix('\r').unwrap_or(l));

        let header = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| malformed("empty output"))?;
        let revision_id = header.split_once(' ').map_or(header, |(id, _)| id);
        if revision_id.is_empty() {
            return Err(malformed("missing revision id"));
        }
        if is_uncommitted_revision(revision_id) {
            return Err(BlameError::UncommittedChange);
        }

        let author_name = next_field(&mut lines, porcelain::AUTHOR)?;
        let author_mail = next_field(&mut lines, porcelain::AUTHOR_MAIL)?;
        let author_time = next_timestamp(&mut lines, porcelain::AUTHOR_TIME)?;
        skip_line(&mut lines, porcelain::AUTHOR_TZ)?;
        let committer_name = next_field(&mut lines, porcelain::COMMITTER)?;
        let committer_mail = next_field(&mut lines, porcelain::COMMITTER_MAIL)?;
        let committer_time = next_timestamp(&mut lines, porcelain::COMMITTER_TIME)?;
        skip_line(&mut lines, porcelain::COMMITTER_TZ)?;
        let summary = next_field(&mut lines, porcelain::SUMMARY)?;

        Ok(Attribution {
            author: Identity::new(author_name, author_mail, author_time),
            committer: Identity::new(committer_name, committer_mail, committer_time),
            summary: summary.to_string(),
            revision_id: revision_id.to_string(),
        })
    }
}

/// All zeros at SHA-1 or SHA-256 length
pub(super) fn is_uncommitted_revision(revision_id: &str) -> bool {
    matches!(
        revision_id.len(),
        special::SHA1_HEX_LEN | special::SHA256_HEX_LEN
    ) && revision_id.bytes().all(|b| b == b'0')
}

fn malformed(reason: impl Into<String>) -> BlameError {
    BlameError::MalformedOutput(reason.into())
}

/// Value after the first space of the next line, which must start with `key`
fn next_field<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    key: &str,
) -> Result<&'a str, BlameError> {
    let line = lines
        .next()
        .ok_or_else(|| malformed(format!("missing `{key}` line")))?;
    let (found, value) = line.split_once(' ').unwrap_or((line, ""));
    if found != key {
        return Err(malformed(format!("expected `{key}`, found `{found}`")));
    }
    Ok(value)
}

fn next_timestamp<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    key: &str,
) -> Result<i64, BlameError> {
    let value = next_field(lines, key)?;
    value
        .trim()
        .parse()
        .map_err(|_| malformed(format!("`{key}` is not a number: {value:?}")))
}

/// Positional line whose content is not used (timezones)
fn skip_line<'a>(lines: &mut impl Iterator<Item = &'a str>, key: &str) -> Result<(), BlameError> {
    lines
        .next()
        .map(|_| ())
        .ok_or_else(|| malformed(format!("missing `{key}` line")))
}
