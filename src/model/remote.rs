//! Remote tracking data model

/// The upstream a local branch tracks, e.g. `origin/main`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    /// Remote name (`origin`)
    pub remote: String,
    /// Branch name on the remote (`main`, may contain further slashes)
    pub branch: String,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.remote, self.branch)
    }
}
