//! Process configuration, read from environment variables once at startup:
//! - `GH_PERSONAL_ACCESS_TOKEN` - GitHub access token (optional, but needed for
//!   any realistic catalog size)
//! - `RELNOTES_GITHUB_API_URL` - API base URL (default: `https://api.github.com`)
//! - `RELNOTES_DB` - Catalog path (default: platform data directory)
//! - `RELNOTES_PAGE_SIZE` - Releases per page request (default: 30)
//! - `RELNOTES_RATE_LOW_WATER` - Remaining quota below which the fetcher waits
//!   for the rate window to reset (default: 50)

use std::path::PathBuf;

use anyhow::Result;

use crate::fetcher::{DEFAULT_LOW_WATER_MARK, DEFAULT_PAGE_SIZE};
use crate::github::DEFAULT_API_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
    /// Explicit catalog location; `None` uses the platform default.
    pub catalog_path: Option<PathBuf>,
    pub page_size: u32,
    pub low_water_mark: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let parse_u32 = |key: &str, default: u32| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|v| *v > 0)
                .unwrap_or(default)
        };

        Self {
            github_token: non_empty("GH_PERSONAL_ACCESS_TOKEN"),
            github_api_url: non_empty("RELNOTES_GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            catalog_path: non_empty("RELNOTES_DB").map(PathBuf::from),
            page_size: parse_u32("RELNOTES_PAGE_SIZE", DEFAULT_PAGE_SIZE),
            low_water_mark: parse_u32("RELNOTES_RATE_LOW_WATER", DEFAULT_LOW_WATER_MARK),
        }
    }

    /// Catalog location, falling back to the platform data directory.
    pub fn catalog_path(&self) -> Result<PathBuf> {
        match &self.catalog_path {
            Some(path) => Ok(path.clone()),
            None => crate::db::default_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::default();

        assert_eq!(config.github_token, None);
        assert_eq!(config.github_api_url, DEFAULT_API_URL);
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.low_water_mark, 50);
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("GH_PERSONAL_ACCESS_TOKEN", "ghp_secret"),
            ("RELNOTES_GITHUB_API_URL", "http://localhost:9000"),
            ("RELNOTES_DB", "/tmp/catalog.db"),
            ("RELNOTES_PAGE_SIZE", "100"),
            ("RELNOTES_RATE_LOW_WATER", "10"),
        ]);

        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.github_api_url, "http://localhost:9000");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.db")));
        assert_eq!(config.page_size, 100);
        assert_eq!(config.low_water_mark, 10);
    }

    #[test]
    fn empty_token_is_no_token() {
        let config = config_from(&[("GH_PERSONAL_ACCESS_TOKEN", "  ")]);
        assert_eq!(config.github_token, None);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("RELNOTES_PAGE_SIZE", "lots"),
            ("RELNOTES_RATE_LOW_WATER", "0"),
        ]);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.low_water_mark, 50);
    }
}
