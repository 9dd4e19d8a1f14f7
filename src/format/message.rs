//! Template-driven blame messages
//!
//! Templates use `${token}` placeholders, e.g.
//! `${author.name}, ${time.ago} • ${commit.summary}`. Unknown tokens are left
//! in place so a typo stays visible.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use time::macros::format_description;

use super::relative_time::{English, RelativeTimeLocale, format_relative};
use crate::model::{Attribution, Identity};

/// Template for the status message
pub const DEFAULT_STATUS_TEMPLATE: &str = "${author.name} (${time.ago})";

/// Template for the inline annotation after the line
pub const DEFAULT_INLINE_TEMPLATE: &str = "${author.name}, ${time.ago} • ${commit.summary}";

/// Matches `${name}` where name is lowercase words joined by `.` or `_`
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([a-z_.]+)\}").expect("Invalid token regex"));

const ELLIPSIS: char = '…';

/// Renders an [`Attribution`] through a template
#[derive(Debug, Clone)]
pub struct MessageFormatter<L = English> {
    template: String,
    locale: L,
    max_length: Option<usize>,
}

impl<L: RelativeTimeLocale> MessageFormatter<L> {
    pub fn new(template: impl Into<String>, locale: L) -> Self {
        Self {
            template: template.into(),
            locale,
            max_length: None,
        }
    }

    /// Cut rendered messages to `max_chars` characters (ellipsis included)
    pub fn with_max_length(mut self, max_chars: usize) -> Self {
        self.max_length = Some(max_chars);
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Expand the template for `attribution`, with relative times against `now_seconds`
    pub fn render(&self, attribution: &Attribution, now_seconds: i64) -> String {
        let rendered = TOKEN_REGEX.replace_all(&self.template, |caps: &Captures| {
            self.token(attribution, now_seconds, &caps[1])
                .unwrap_or_else(|| Cow::Owned(caps[0].to_string()))
        });

        match self.max_length {
            Some(max) => truncate(&rendered, max),
            None => rendered.into_owned(),
        }
    }

    fn token<'a>(
        &self,
        attribution: &'a Attribution,
        now_seconds: i64,
        name: &str,
    ) -> Option<Cow<'a, str>> {
        let value = match name {
            "commit.hash" => Cow::Borrowed(attribution.revision_id.as_str()),
            "commit.hash_short" => Cow::Borrowed(attribution.short_revision_id()),
            "commit.summary" => Cow::Borrowed(attribution.summary.as_str()),
            "author.name" => Cow::Borrowed(attribution.author.name.as_str()),
            "author.mail" => Cow::Borrowed(attribution.author.bare_email()),
            "author.timestamp" => Cow::Owned(attribution.author.timestamp_seconds.to_string()),
            "author.date" => Cow::Owned(format_date(&attribution.author)),
            "committer.name" => Cow::Borrowed(attribution.committer.name.as_str()),
            "committer.mail" => Cow::Borrowed(attribution.committer.bare_email()),
            "committer.timestamp" => {
                Cow::Owned(attribution.committer.timestamp_seconds.to_string())
            }
            "committer.date" => Cow::Owned(format_date(&attribution.committer)),
            "time.ago" => Cow::Owned(format_relative(
                attribution.author.timestamp_seconds,
                now_seconds,
                &self.locale,
            )),
            "time.c_ago" => Cow::Owned(format_relative(
                attribution.committer.timestamp_seconds,
                now_seconds,
                &self.locale,
            )),
            _ => return None,
        };
        Some(value)
    }
}

/// UTC calendar date (YYYY-MM-DD) of an identity's timestamp
fn format_date(identity: &Identity) -> String {
    identity
        .time()
        .and_then(|dt| dt.format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Shorten `text` to at most `max_chars` characters, ending in `…` when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.push(ELLIPSIS);
    cut
}
