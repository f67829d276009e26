use crate::domain::model::TagInfo;
use crate::utils::error::{ReleaseError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn non_word_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("static pattern"))
}

/// Turns a branch name into a pre-release identifier: `feature/ABC-1` -> `feature.abc.1`.
pub fn sanitize_branch(branch: &str) -> String {
    non_word_chars().replace_all(branch, ".").to_lowercase()
}

pub fn is_release_branch(branch: &str, release_branches: &[String]) -> bool {
    release_branches.iter().any(|b| b == branch)
}

pub fn is_prerelease(tag: &str) -> bool {
    tag.contains('-')
}

/// Picks the most recently committed tag relevant to `branch`.
///
/// Release branches consider every merged tag; other branches only the tags
/// carrying their own pre-release identifier. Ties keep the earlier tag.
pub fn select_last_tag(
    tags: Vec<TagInfo>,
    branch: &str,
    release_branches: &[String],
) -> Option<TagInfo> {
    let filter = (!is_release_branch(branch, release_branches)).then(|| sanitize_branch(branch));

    tags.into_iter()
        .filter(|tag| match &filter {
            Some(f) => tag.name.contains(f.as_str()),
            None => true,
        })
        .fold(None, |best: Option<TagInfo>, tag| match best {
            Some(b) if b.commit.committed_at >= tag.commit.committed_at => Some(b),
            _ => Some(tag),
        })
}

/// Computes the tag for the next release.
///
/// Release branches use the manifest version as is. Any other branch gets
/// `v{version}-{branch}.{build}`, where `build` continues the numbering of
/// the previous tag for the same version and branch. A build number that
/// cannot be incremented is an error rather than a restart at 1.
pub fn next_version(
    manifest_version: &str,
    branch: &str,
    release_branches: &[String],
    last_tag: Option<&str>,
) -> Result<String> {
    if is_release_branch(branch, release_branches) {
        return Ok(manifest_version.to_string());
    }

    let pre_release = sanitize_branch(branch);
    let prefix = format!("v{}-{}.", manifest_version, pre_release);

    let previous_build = last_tag.and_then(|tag| {
        tag.strip_prefix(prefix.as_str())
            .filter(|build| !build.is_empty() && build.chars().all(|c| c.is_ascii_digit()))
            .map(|build| (tag, build))
    });

    let build_number = match previous_build {
        Some((tag, build)) => build
            .parse::<u64>()
            .ok()
            .and_then(|build| build.checked_add(1))
            .ok_or_else(|| ReleaseError::BuildNumberOverflow {
                tag: tag.to_string(),
            })?,
        None => 1,
    };

    Ok(format!("{}{}", prefix, build_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CommitInfo;
    use chrono::{TimeZone, Utc};

    fn master() -> Vec<String> {
        vec!["master".to_string()]
    }

    fn tag(name: &str, ts: i64) -> TagInfo {
        TagInfo {
            name: name.to_string(),
            commit: CommitInfo {
                id: format!("id-{}", name),
                summary: String::new(),
                committed_at: Utc.timestamp_opt(ts, 0).unwrap(),
            },
        }
    }

    #[test]
    fn test_sanitize_branch() {
        assert_eq!(sanitize_branch("feature/ABC-1"), "feature.abc.1");
        assert_eq!(sanitize_branch("develop"), "develop");
        assert_eq!(sanitize_branch("release_2.x"), "release_2.x");
    }

    #[test]
    fn test_release_branch_uses_manifest_version() {
        assert_eq!(next_version("1.4.0", "master", &master(), Some("1.3.0")).unwrap(), "1.4.0");
    }

    #[test]
    fn test_prerelease_first_build() {
        assert_eq!(next_version("1.4.0", "develop", &master(), None).unwrap(), "v1.4.0-develop.1");
    }

    #[test]
    fn test_prerelease_increments_build() {
        assert_eq!(
            next_version("1.4.0", "develop", &master(), Some("v1.4.0-develop.7")).unwrap(),
            "v1.4.0-develop.8"
        );
    }

    #[test]
    fn test_prerelease_restarts_on_new_version() {
        assert_eq!(
            next_version("1.5.0", "develop", &master(), Some("v1.4.0-develop.7")).unwrap(),
            "v1.5.0-develop.1"
        );
        assert_eq!(
            next_version("1.4.0", "develop", &master(), Some("v1.4.0-develop.rc")).unwrap(),
            "v1.4.0-develop.1"
        );
    }

    #[test]
    fn test_prerelease_build_number_overflow_is_an_error() {
        let at_max = format!("v1.4.0-develop.{}", u64::MAX);
        assert!(matches!(
            next_version("1.4.0", "develop", &master(), Some(&at_max)),
            Err(ReleaseError::BuildNumberOverflow { .. })
        ));

        let too_long = "v1.4.0-develop.123456789012345678901234567890";
        assert!(matches!(
            next_version("1.4.0", "develop", &master(), Some(too_long)),
            Err(ReleaseError::BuildNumberOverflow { .. })
        ));

        let below_max = format!("v1.4.0-develop.{}", u64::MAX - 1);
        assert_eq!(
            next_version("1.4.0", "develop", &master(), Some(&below_max)).unwrap(),
            format!("v1.4.0-develop.{}", u64::MAX)
        );
    }

    #[test]
    fn test_select_last_tag_on_release_branch() {
        let tags = vec![tag("1.0.0", 100), tag("v1.1.0-develop.1", 300), tag("1.1.0", 200)];
        let last = select_last_tag(tags, "master", &master()).unwrap();
        assert_eq!(last.name, "v1.1.0-develop.1");
    }

    #[test]
    fn test_select_last_tag_filters_by_branch() {
        let tags = vec![
            tag("1.0.0", 500),
            tag("v1.1.0-develop.1", 100),
            tag("v1.1.0-develop.2", 200),
            tag("v1.1.0-feature.x.1", 400),
        ];
        let last = select_last_tag(tags, "develop", &master()).unwrap();
        assert_eq!(last.name, "v1.1.0-develop.2");
    }

    #[test]
    fn test_select_last_tag_keeps_first_on_tie() {
        let tags = vec![tag("1.0.0", 100), tag("1.0.1", 100)];
        assert_eq!(select_last_tag(tags, "master", &master()).unwrap().name, "1.0.0");
        assert!(select_last_tag(vec![], "master", &master()).is_none());
    }

    #[test]
    fn test_is_prerelease() {
        assert!(is_prerelease("v1.0.0-develop.1"));
        assert!(!is_prerelease("1.0.0"));
    }
}
