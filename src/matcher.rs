//! Pairing of local versions with GitHub releases.

use crate::models::{LocalVersionRecord, NoteRecord, RemoteRelease};

/// Result of looking up a local version among remote releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A release matched; its notes should replace the local ones.
    Matched(NoteRecord),
    /// No release carries the version's label; local notes stay as they are.
    NoMatch,
}

/// Label a release for `version_raw` is expected to carry, e.g. `v1.2.3`.
pub fn expected_label(version_raw: &str) -> String {
    format!("v{}", version_raw)
}

/// Find the release for `version` among `releases`.
///
/// Releases are scanned in the given order and the first one whose name or
/// tag name equals the expected label wins, so duplicate labels resolve to
/// the earliest entry. A matched release without a body yields empty notes.
pub fn match_release(version: &LocalVersionRecord, releases: &[RemoteRelease]) -> MatchOutcome {
    let label = expected_label(&version.version_raw);

    releases
        .iter()
        .find(|release| carries_label(release, &label))
        .map_or(MatchOutcome::NoMatch, |release| {
            MatchOutcome::Matched(NoteRecord {
                content: release.body.clone().unwrap_or_default(),
            })
        })
}

fn carries_label(release: &RemoteRelease, label: &str) -> bool {
    release.name.as_deref() == Some(label) || release.tag_name.as_deref() == Some(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn version(raw: &str) -> LocalVersionRecord {
        LocalVersionRecord {
            id: Uuid::new_v4(),
            source: "github.com/o/r".to_string(),
            version_raw: raw.to_string(),
            created_at: Utc::now(),
        }
    }

    fn release(name: Option<&str>, tag: Option<&str>, body: Option<&str>) -> RemoteRelease {
        RemoteRelease {
            name: name.map(str::to_string),
            tag_name: tag.map(str::to_string),
            body: body.map(str::to_string),
        }
    }

    fn matched(content: &str) -> MatchOutcome {
        MatchOutcome::Matched(NoteRecord {
            content: content.to_string(),
        })
    }

    #[test]
    fn expected_label_prefixes_v() {
        assert_eq!(expected_label("1.2.3"), "v1.2.3");
        assert_eq!(expected_label(""), "v");
    }

    #[test]
    fn matches_on_release_name() {
        let releases = vec![release(Some("v1.0.0"), Some("release-1"), Some("notes"))];
        assert_eq!(match_release(&version("1.0.0"), &releases), matched("notes"));
    }

    #[test]
    fn matches_on_tag_name() {
        let releases = vec![release(Some("First release"), Some("v1.0.0"), Some("notes"))];
        assert_eq!(match_release(&version("1.0.0"), &releases), matched("notes"));
    }

    #[test]
    fn missing_body_yields_empty_notes() {
        let releases = vec![release(None, Some("v1.0.0"), None)];
        assert_eq!(match_release(&version("1.0.0"), &releases), matched(""));
    }

    #[test]
    fn unlabelled_version_does_not_match() {
        let releases = vec![
            release(Some("1.0.0"), Some("1.0.0"), Some("no prefix")),
            release(None, None, Some("anonymous")),
            release(Some("v1.0.01"), Some("v1.0.0-rc1"), Some("close")),
        ];
        assert_eq!(match_release(&version("1.0.0"), &releases), MatchOutcome::NoMatch);
        assert_eq!(match_release(&version("1.0.0"), &[]), MatchOutcome::NoMatch);
    }

    #[test]
    fn first_release_wins_on_duplicate_labels() {
        let releases = vec![
            release(Some("v2.0.0"), Some("v2.0.0"), Some("two")),
            release(None, Some("v1.0.0"), Some("first")),
            release(Some("v1.0.0"), None, Some("second")),
        ];
        assert_eq!(match_release(&version("1.0.0"), &releases), matched("first"));
    }
}
