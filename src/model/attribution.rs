//! Attribution (blame) data model

use time::OffsetDateTime;

/// Who made a change and when
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    /// Display name as recorded by git
    pub name: String,
    /// Email exactly as git prints it, angle brackets included
    pub email: String,
    /// Unix timestamp in seconds
    pub timestamp_seconds: i64,
}

/// Blame information for a single line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attribution {
    pub author: Identity,
    pub committer: Identity,
    /// First line of the commit message
    pub summary: String,
    /// Full commit hash (never the all-zero "not committed" id)
    pub revision_id: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, timestamp_seconds: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            timestamp_seconds,
        }
    }

    /// Email without the surrounding `<` `>`
    pub fn bare_email(&self) -> &str {
        self.email
            .strip_prefix('<')
            .and_then(|e| e.strip_suffix('>'))
            .unwrap_or(&self.email)
    }

    /// Timestamp as a UTC date-time, `None` if out of range
    pub fn time(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.timestamp_seconds).ok()
    }
}

impl Attribution {
    /// Abbreviated hash (7 chars, like `git log --oneline`)
    pub fn short_revision_id(&self) -> &str {
        let end = self
            .revision_id
            .char_indices()
            .nth(7)
            .map_or(self.revision_id.len(), |(i, _)| i);
        &self.revision_id[..end]
    }
}
