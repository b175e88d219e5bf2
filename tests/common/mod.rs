//! Fakes shared by the integration specs.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};

use release_notes_sync::catalog::ReleaseCatalog;
use release_notes_sync::clock::Clock;
use release_notes_sync::db::Database;
use release_notes_sync::github::{GithubError, ReleaseService};
use release_notes_sync::models::*;

/// Fixed "now" used by [`FakeClock`].
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn release(name: Option<&str>, tag: Option<&str>, body: Option<&str>) -> RemoteRelease {
    RemoteRelease {
        name: name.map(str::to_string),
        tag_name: tag.map(str::to_string),
        body: body.map(str::to_string),
    }
}

/// Releases tagged `v{n}.0.0` for every `n` in `range`.
pub fn numbered_releases(range: std::ops::Range<u32>) -> Vec<RemoteRelease> {
    range
        .map(|n| {
            let tag = format!("v{}.0.0", n);
            release(None, Some(&tag), Some(&format!("notes {}", n)))
        })
        .collect()
}

pub fn page(releases: Vec<RemoteRelease>, next_page: Option<u32>, remaining: u32) -> ReleasePage {
    ReleasePage {
        releases,
        next_page,
        rate: RateLimit {
            remaining,
            reset: fixed_now() + chrono::Duration::minutes(15),
        },
    }
}

/// A page request observed by [`FakeService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub repo: String,
    pub page: u32,
    pub per_page: u32,
}

/// In-memory release service serving scripted pages per repository.
///
/// Page `n` of a repository is entry `n - 1` of its script; an `Err` entry
/// fails that request with a server error.
#[derive(Default)]
pub struct FakeService {
    repos: HashMap<String, Vec<Result<ReleasePage, String>>>,
    calls: Mutex<Vec<PageRequest>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_releases(self, repo: &str, releases: Vec<RemoteRelease>) -> Self {
        self.with_pages(repo, vec![page(releases, None, 4000)])
    }

    pub fn with_pages(self, repo: &str, pages: Vec<ReleasePage>) -> Self {
        self.with_script(repo, pages.into_iter().map(Ok).collect())
    }

    pub fn with_failure(self, repo: &str, message: &str) -> Self {
        self.with_script(repo, vec![Err(message.to_string())])
    }

    pub fn with_script(mut self, repo: &str, script: Vec<Result<ReleasePage, String>>) -> Self {
        self.repos.insert(repo.to_string(), script);
        self
    }

    pub fn calls(&self) -> Vec<PageRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, repo: &str) -> usize {
        self.calls().iter().filter(|c| c.repo == repo).count()
    }
}

impl ReleaseService for FakeService {
    async fn list_releases(
        &self,
        repo: &RemoteRepoRef,
        page: u32,
        per_page: u32,
    ) -> Result<ReleasePage, GithubError> {
        let key = repo.to_string();
        self.calls.lock().unwrap().push(PageRequest {
            repo: key.clone(),
            page,
            per_page,
        });

        let entry = self
            .repos
            .get(&key)
            .and_then(|script| script.get((page as usize).checked_sub(1)?))
            .ok_or_else(|| GithubError::NotFound(key.clone()))?;

        entry.clone().map_err(GithubError::Server)
    }
}

/// Clock frozen at [`fixed_now`] that records requested sleeps.
#[derive(Default)]
pub struct FakeClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Catalog wrapper that fails selected operations.
pub struct FlakyCatalog {
    pub db: Database,
    pub fail_list_sources: bool,
    pub fail_list_versions_for: Option<String>,
    pub fail_set_notes: bool,
}

impl FlakyCatalog {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            fail_list_sources: false,
            fail_list_versions_for: None,
            fail_set_notes: false,
        }
    }
}

impl ReleaseCatalog for FlakyCatalog {
    fn list_sources(&self) -> Result<Vec<ReleaseSource>> {
        if self.fail_list_sources {
            anyhow::bail!("catalog index unreadable");
        }
        self.db.list_sources()
    }

    fn list_versions(&self, source: &str) -> Result<Vec<LocalVersionRecord>> {
        if self.fail_list_versions_for.as_deref() == Some(source) {
            anyhow::bail!("versions index unreadable");
        }
        self.db.list_versions(source)
    }

    fn set_notes(&self, version: &LocalVersionRecord, note: &NoteRecord) -> Result<()> {
        if self.fail_set_notes {
            anyhow::bail!("disk full");
        }
        self.db.set_notes(version, note)
    }
}

pub fn memory_db() -> Database {
    let db = Database::open_memory().expect("Failed to create in-memory database");
    db.migrate().expect("Failed to run migrations");
    db
}

pub fn stored_notes(db: &Database, version: &LocalVersionRecord) -> Option<String> {
    db.get_version_notes(version.id)
        .expect("Query failed")
        .map(|n| n.content)
}
