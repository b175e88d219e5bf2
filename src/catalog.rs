//! Release catalog boundary.

use anyhow::Result;

use crate::models::{LocalVersionRecord, NoteRecord, ReleaseSource};

/// Storage of tracked release sources, their versions and version notes.
///
/// Implementations are expected to be internally consistent; the sync engine
/// treats every error returned here as fatal for the run.
pub trait ReleaseCatalog {
    fn list_sources(&self) -> Result<Vec<ReleaseSource>>;

    /// All versions tracked under the source with the given full identifier.
    fn list_versions(&self, source: &str) -> Result<Vec<LocalVersionRecord>>;

    /// Replace the stored notes of `version` with `note`.
    fn set_notes(&self, version: &LocalVersionRecord, note: &NoteRecord) -> Result<()>;
}
