//! GitHub release metadata.

use serde::{Deserialize, Deserializer};

/// Version token meaning "newest stable release".
pub const LATEST: &str = "latest";

/// Page size requested when not asking for all releases.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// A published release of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Tag name with a single leading `v` removed.
    #[serde(rename = "tag_name", deserialize_with = "strip_v")]
    pub tag: String,
    /// Whether the release is marked as a pre-release.
    #[serde(rename = "prerelease", default)]
    pub is_pre_release: bool,
}

impl Release {
    /// Build a release, normalising the tag.
    #[must_use]
    pub fn new(tag: impl AsRef<str>, is_pre_release: bool) -> Self {
        Self {
            tag: normalize_tag(tag.as_ref()).to_string(),
            is_pre_release,
        }
    }
}

/// Strip a single leading `v` from a tag.
#[must_use]
pub fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

fn strip_v<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let tag = String::deserialize(deserializer)?;
    Ok(normalize_tag(&tag).to_string())
}

/// Pick the first release in listing order that passes the filter.
///
/// Upstream order is trusted; releases are not re-sorted by version.
#[must_use]
pub fn select_latest(releases: &[Release], include_pre_releases: bool) -> Option<&Release> {
    releases
        .iter()
        .find(|release| include_pre_releases || !release.is_pre_release)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_strips_single_v() {
        let json = r#"[
            {"tag_name": "v1.2.3", "prerelease": false, "name": "ignored"},
            {"tag_name": "vv2.0.0", "prerelease": true},
            {"tag_name": "3.0.0"}
        ]"#;
        let releases: Vec<Release> = serde_json::from_str(json).unwrap();
        assert_eq!(
            releases,
            vec![
                Release::new("1.2.3", false),
                Release {
                    tag: "v2.0.0".into(),
                    is_pre_release: true
                },
                Release::new("3.0.0", false),
            ]
        );
    }

    #[test]
    fn test_select_latest_skips_pre_releases() {
        let releases = vec![Release::new("2.0.0", true), Release::new("1.5.0", false)];
        assert_eq!(
            select_latest(&releases, false).map(|r| r.tag.as_str()),
            Some("1.5.0")
        );
        assert_eq!(
            select_latest(&releases, true).map(|r| r.tag.as_str()),
            Some("2.0.0")
        );
    }

    #[test]
    fn test_select_latest_trusts_listing_order() {
        let releases = vec![Release::new("1.0.0", false), Release::new("9.0.0", false)];
        assert_eq!(select_latest(&releases, false).unwrap().tag, "1.0.0");
    }

    #[test]
    fn test_select_latest_none() {
        assert!(select_latest(&[], true).is_none());
        assert!(select_latest(&[Release::new("1.0.0-rc1", true)], false).is_none());
    }
}
