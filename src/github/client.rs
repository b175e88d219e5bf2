//! HTTP client for the GitHub releases API.
//!
//! Authenticated requests are allowed 5000 requests per hour; without a token
//! GitHub only allows 60, which is rarely enough for a full catalog.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, StatusCode, Url};

use super::{GithubError, ReleaseService};
use crate::models::{RateLimit, ReleasePage, RemoteRelease, RemoteRepoRef};

/// Public GitHub API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("release-notes-sync/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RATE_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_RESET_HEADER: &str = "x-ratelimit-reset";

/// GitHub REST client implementing [`ReleaseService`].
#[derive(Debug, Clone)]
pub struct GithubClient {
    api_url: String,
    token: Option<String>,
    client: Client,
}

impl GithubClient {
    /// Create a client for `api_url`, authenticating with `token` if given.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self, GithubError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// Build a GET request with the GitHub media type and optional auth header.
    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let mut req = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }
}

impl ReleaseService for GithubClient {
    async fn list_releases(
        &self,
        repo: &RemoteRepoRef,
        page: u32,
        per_page: u32,
    ) -> Result<ReleasePage, GithubError> {
        let response = self
            .get(&format!("/repos/{}/{}/releases", repo.owner, repo.repo))
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await?;

        let rate = parse_rate_limit(response.headers(), Utc::now());
        let next_page = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_next_page);

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => GithubError::NotFound(repo.to_string()),
                StatusCode::UNAUTHORIZED => GithubError::Unauthorized,
                StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if rate.remaining == 0 => {
                    GithubError::RateLimited(rate.reset)
                }
                _ => GithubError::Server(format!("{}: {}", status, body)),
            });
        }

        let releases: Vec<RemoteRelease> = response.json().await?;

        Ok(ReleasePage {
            releases,
            next_page,
            rate,
        })
    }
}

/// Read the rate window from GitHub's `X-RateLimit-*` headers.
///
/// Missing or malformed headers mean the quota is unknown; such a response
/// is treated as unthrottled with a window resetting at `now`.
fn parse_rate_limit(headers: &HeaderMap, now: DateTime<Utc>) -> RateLimit {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let remaining = header(RATE_REMAINING_HEADER)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(u32::MAX);
    let reset = header(RATE_RESET_HEADER)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(now);

    RateLimit { remaining, reset }
}

/// Extract the `page` parameter of the `rel="next"` entry of a `Link` header.
fn parse_next_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="next""#) {
            return None;
        }

        let target = target.trim().trim_start_matches('<').trim_end_matches('>');
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}
