use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A release published on GitHub.
///
/// Only the fields used for matching and note import are kept; everything
/// else in the API payload is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRelease {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    /// Release notes (markdown). `None` means nothing was published.
    #[serde(default)]
    pub body: Option<String>,
}

/// Request quota reported by GitHub for the current rate window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests left in the current window.
    pub remaining: u32,
    /// When the window resets.
    pub reset: DateTime<Utc>,
}

/// One page of a repository's releases listing.
#[derive(Debug, Clone)]
pub struct ReleasePage {
    pub releases: Vec<RemoteRelease>,
    /// Page to request next, or `None` on the last page.
    pub next_page: Option<u32>,
    pub rate: RateLimit,
}
