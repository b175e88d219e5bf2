use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A release version tracked locally under a [`super::ReleaseSource`].
///
/// The notes for a version are stored separately by the catalog and are only
/// ever replaced, never read, by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVersionRecord {
    pub id: Uuid,
    /// Full identifier of the owning source.
    pub source: String,
    /// Version as recorded locally, without any `v` prefix (e.g. `1.2.3`).
    pub version_raw: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for LocalVersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.source, self.version_raw)
    }
}

/// Release note text stored for a version.
///
/// Empty content is meaningful: it records that upstream publishes no notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub content: String,
}
