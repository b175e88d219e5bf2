//! GitHub releases API boundary.
//!
//! [`ReleaseService`] is the paginated "list releases" operation the fetcher
//! consumes; [`GithubClient`] implements it against the GitHub REST API.

mod client;

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ReleasePage, RemoteRepoRef};

pub use client::{GithubClient, DEFAULT_API_URL};

/// GitHub API errors.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: access token missing or invalid")]
    Unauthorized,

    #[error("Rate limit exhausted until {0}")]
    RateLimited(DateTime<Utc>),

    #[error("Server error: {0}")]
    Server(String),
}

/// Paginated listing of a repository's releases.
pub trait ReleaseService {
    /// Fetch one page of releases. Pages are numbered from 1.
    fn list_releases(
        &self,
        repo: &RemoteRepoRef,
        page: u32,
        per_page: u32,
    ) -> impl Future<Output = Result<ReleasePage, GithubError>> + Send;
}
