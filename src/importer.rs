//! Release notes synchronization.
//!
//! [`NotesImporter::sync`] walks every release source in the catalog, pulls
//! the matching GitHub releases and overwrites the notes of every local
//! version that has a release. Upstream is the source of truth: a release
//! without a body clears the local notes.
//!
//! Catalog failures abort the run. A source whose releases cannot be fetched
//! is logged and skipped so the remaining sources still get synced.

use anyhow::{Context, Result};

use crate::catalog::ReleaseCatalog;
use crate::clock::Clock;
use crate::fetcher::ReleaseFetcher;
use crate::github::ReleaseService;
use crate::matcher::{match_release, MatchOutcome};
use crate::models::{LocalVersionRecord, ReleaseSource, RemoteRelease};
use crate::source::resolve;

/// What happened to one release source during a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Not a GitHub source; skipped.
    Unsupported,
    /// No local versions; GitHub was not queried.
    NoVersions,
    /// Releases could not be fetched; local notes untouched.
    FetchFailed { error: String },
    /// Notes were imported.
    Synced {
        /// Versions whose notes were overwritten.
        updated: usize,
        /// Versions without a matching release.
        unmatched: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub source: ReleaseSource,
    pub outcome: SourceOutcome,
}

/// Per-source results of a completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub sources: Vec<SourceReport>,
}

impl SyncReport {
    pub fn outcome_for(&self, source: &str) -> Option<&SourceOutcome> {
        self.sources
            .iter()
            .find(|r| r.source.full == source)
            .map(|r| &r.outcome)
    }

    /// Total number of versions whose notes were overwritten.
    pub fn updated(&self) -> usize {
        self.sources
            .iter()
            .map(|r| match r.outcome {
                SourceOutcome::Synced { updated, .. } => updated,
                _ => 0,
            })
            .sum()
    }

    /// Sources whose releases could not be fetched.
    pub fn failed_sources(&self) -> impl Iterator<Item = &ReleaseSource> {
        self.sources
            .iter()
            .filter(|r| matches!(r.outcome, SourceOutcome::FetchFailed { .. }))
            .map(|r| &r.source)
    }
}

/// Imports GitHub release notes into a release catalog.
pub struct NotesImporter<K, S, C> {
    catalog: K,
    fetcher: ReleaseFetcher<S, C>,
}

impl<K, S, C> NotesImporter<K, S, C>
where
    K: ReleaseCatalog,
    S: ReleaseService,
    C: Clock,
{
    pub fn new(catalog: K, fetcher: ReleaseFetcher<S, C>) -> Self {
        Self { catalog, fetcher }
    }

    pub fn catalog(&self) -> &K {
        &self.catalog
    }

    pub fn fetcher(&self) -> &ReleaseFetcher<S, C> {
        &self.fetcher
    }

    /// Sync notes for every source in the catalog, one source at a time.
    pub async fn sync(&self) -> Result<SyncReport> {
        let sources = self
            .catalog
            .list_sources()
            .context("Listing release sources")?;

        let mut report = SyncReport::default();

        for source in sources {
            let outcome = self.sync_source(&source).await?;
            report.sources.push(SourceReport { source, outcome });
        }

        tracing::info!(
            sources = report.sources.len(),
            updated = report.updated(),
            failed = report.failed_sources().count(),
            "Release notes sync finished"
        );

        Ok(report)
    }

    async fn sync_source(&self, source: &ReleaseSource) -> Result<SourceOutcome> {
        let Some(repo) = resolve(source) else {
            return Ok(SourceOutcome::Unsupported);
        };

        let versions = self
            .catalog
            .list_versions(&source.full)
            .with_context(|| format!("Listing all versions for release source '{}'", source))?;

        if versions.is_empty() {
            return Ok(SourceOutcome::NoVersions);
        }

        let releases = match self.fetcher.fetch_all(&repo).await {
            Ok(releases) => releases,
            Err(err) => {
                tracing::error!(
                    %source,
                    error = %err,
                    "Failed to fetch releases from GitHub"
                );
                return Ok(SourceOutcome::FetchFailed {
                    error: err.to_string(),
                });
            }
        };

        self.import_notes(source, &versions, &releases)
    }

    fn import_notes(
        &self,
        source: &ReleaseSource,
        versions: &[LocalVersionRecord],
        releases: &[RemoteRelease],
    ) -> Result<SourceOutcome> {
        let mut updated = 0;
        let mut unmatched = 0;

        for version in versions {
            match match_release(version, releases) {
                MatchOutcome::Matched(note) => {
                    self.catalog.set_notes(version, &note).with_context(|| {
                        format!(
                            "Saving notes for release version '{}' of release source '{}'",
                            version.version_raw, source
                        )
                    })?;
                    updated += 1;
                }
                MatchOutcome::NoMatch => unmatched += 1,
            }
        }

        tracing::debug!(%source, updated, unmatched, "Imported release notes");

        Ok(SourceOutcome::Synced { updated, unmatched })
    }
}
