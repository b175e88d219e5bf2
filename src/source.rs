//! Mapping of catalog release sources to GitHub repositories.

use crate::models::{ReleaseSource, RemoteRepoRef};

/// Host prefix of release sources published on GitHub.
pub const SUPPORTED_HOST: &str = "github.com";

/// Resolve `source` to a GitHub repository.
///
/// Only identifiers shaped exactly `github.com/<owner>/<repo>` resolve; any
/// other source is simply not hosted on GitHub and yields `None`.
pub fn resolve(source: &ReleaseSource) -> Option<RemoteRepoRef> {
    let parts: Vec<&str> = source.full.split('/').collect();

    match parts.as_slice() {
        [host, owner, repo] if *host == SUPPORTED_HOST && !owner.is_empty() && !repo.is_empty() => {
            Some(RemoteRepoRef {
                owner: (*owner).to_string(),
                repo: (*repo).to_string(),
            })
        }
        _ => None,
    }
}
