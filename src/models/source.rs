use std::fmt;

use serde::{Deserialize, Serialize};

/// An upstream origin of releases, as tracked by the catalog.
///
/// The identifier is opaque to the catalog. Only identifiers of the form
/// `github.com/<owner>/<repo>` are understood by the sync engine; see
/// [`crate::source::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseSource {
    /// Full identifier, e.g. `github.com/cloudfoundry/bosh`.
    pub full: String,
}

impl ReleaseSource {
    pub fn new(full: impl Into<String>) -> Self {
        Self { full: full.into() }
    }
}

impl fmt::Display for ReleaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// A GitHub repository that a [`ReleaseSource`] resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteRepoRef {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RemoteRepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
