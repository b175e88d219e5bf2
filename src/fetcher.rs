//! Retrieval of a repository's complete release list.
//!
//! Pages are requested one after another until GitHub reports no next page.
//! After every page the reported quota is checked; once it drops below the
//! low-water mark the fetcher sleeps until the rate window resets instead of
//! running into rate-limit errors.

use std::time::Duration;

use thiserror::Error;

use crate::clock::Clock;
use crate::github::{GithubError, ReleaseService};
use crate::models::{RateLimit, RemoteRelease, RemoteRepoRef};

pub const DEFAULT_PAGE_SIZE: u32 = 30;
pub const DEFAULT_LOW_WATER_MARK: u32 = 50;

/// Accumulated releases above this count are logged while paging.
const LARGE_LISTING: usize = 200;

/// A page request failed part way through a listing.
#[derive(Debug, Error)]
#[error("Listing GitHub releases for '{repo}' (page {page}): {source}")]
pub struct FetchError {
    pub repo: RemoteRepoRef,
    /// Page whose request failed.
    pub page: u32,
    /// Releases accumulated from earlier pages.
    pub fetched: Vec<RemoteRelease>,
    #[source]
    pub source: GithubError,
}

pub struct ReleaseFetcher<S, C> {
    service: S,
    clock: C,
    page_size: u32,
    low_water_mark: u32,
}

impl<S: ReleaseService, C: Clock> ReleaseFetcher<S, C> {
    pub fn new(service: S, clock: C) -> Self {
        Self {
            service,
            clock,
            page_size: DEFAULT_PAGE_SIZE,
            low_water_mark: DEFAULT_LOW_WATER_MARK,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_low_water_mark(mut self, low_water_mark: u32) -> Self {
        self.low_water_mark = low_water_mark;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Fetch every release of `repo`, in the order GitHub lists them.
    pub async fn fetch_all(&self, repo: &RemoteRepoRef) -> Result<Vec<RemoteRelease>, FetchError> {
        tracing::debug!(%repo, "Fetching GitHub releases");

        let mut all_releases = Vec::new();
        let mut page = 1;

        loop {
            let result = self
                .service
                .list_releases(repo, page, self.page_size)
                .await;

            let release_page = match result {
                Ok(release_page) => release_page,
                Err(source) => {
                    return Err(FetchError {
                        repo: repo.clone(),
                        page,
                        fetched: all_releases,
                        source,
                    })
                }
            };

            self.throttle(&release_page.rate).await;

            all_releases.extend(release_page.releases);

            let Some(next_page) = release_page.next_page else {
                break;
            };

            if all_releases.len() > LARGE_LISTING {
                tracing::debug!(%repo, count = all_releases.len(), "Found many GitHub releases");
            }

            page = next_page;
        }

        Ok(all_releases)
    }

    /// Sleep until the rate window resets if the quota is running low.
    async fn throttle(&self, rate: &RateLimit) {
        if rate.remaining < self.low_water_mark {
            let wait = (rate.reset - self.clock.now())
                .to_std()
                .unwrap_or(Duration::ZERO);

            tracing::warn!(
                remaining = rate.remaining,
                wait_secs = wait.as_secs(),
                "Sleeping until GitHub rate limit resets"
            );
            self.clock.sleep(wait).await;
        } else {
            tracing::debug!(
                remaining = rate.remaining,
                "GitHub requests left in current rate window"
            );
        }
    }
}
