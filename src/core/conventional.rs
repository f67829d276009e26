use crate::domain::model::{CommitInfo, ConventionalCommit};
use crate::utils::error::{ReleaseError, Result};
use regex::Regex;

pub const DEFAULT_COMMIT_TYPES: &[&str] = &[
    "build", "chore", "ci", "docs", "feat", "feature", "fix", "perf", "refactor", "style", "test",
];

pub const DEFAULT_FIX_TYPES: &[&str] = &["fix"];

/// Matches commit summaries of the form `type(issue): comment`.
#[derive(Debug, Clone)]
pub struct CommitParser {
    regex: Regex,
    fix_types: Vec<String>,
}

impl CommitParser {
    pub fn new(commit_types: &[String], fix_types: &[String]) -> Result<Self> {
        if commit_types.is_empty() {
            return Err(ReleaseError::ConfigValidationError {
                field: "commits.types".to_string(),
                message: "At least one commit type is required".to_string(),
            });
        }

        let prefix_match = commit_types
            .iter()
            .map(|prefix| format!(r"\b{}\b", regex::escape(prefix)))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r"(?i)^(?P<type>{})(\((?P<issue>\S*)\))?:\s+(?P<comment>.*)$",
            prefix_match
        );

        let regex = Regex::new(&pattern).map_err(|e| ReleaseError::ConfigValidationError {
            field: "commits.types".to_string(),
            message: format!("Cannot build commit pattern: {}", e),
        })?;

        Ok(Self {
            regex,
            fix_types: fix_types.iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    pub fn parse(&self, summary: &str) -> Option<ConventionalCommit> {
        let caps = self.regex.captures(summary)?;
        Some(ConventionalCommit {
            kind: caps["type"].to_lowercase(),
            issue: caps
                .name("issue")
                .map(|m| m.as_str().to_string())
                .filter(|issue| !issue.is_empty()),
            comment: caps["comment"].to_string(),
        })
    }

    pub fn is_fix(&self, commit: &ConventionalCommit) -> bool {
        self.fix_types.iter().any(|t| *t == commit.kind)
    }

    /// A release is due as soon as one commit follows the convention.
    pub fn is_new_release(&self, commits: &[CommitInfo]) -> bool {
        commits
            .iter()
            .any(|commit| self.regex.is_match(&commit.summary))
    }
}

impl Default for CommitParser {
    fn default() -> Self {
        let types: Vec<String> = DEFAULT_COMMIT_TYPES.iter().map(|t| t.to_string()).collect();
        let fixes: Vec<String> = DEFAULT_FIX_TYPES.iter().map(|t| t.to_string()).collect();
        Self::new(&types, &fixes).expect("default commit types form a valid pattern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commit(summary: &str) -> CommitInfo {
        CommitInfo {
            id: "abc".to_string(),
            summary: summary.to_string(),
            committed_at: Utc::now(),
        }
    }

    #[test]
    fn test_parse_with_issue() {
        let parser = CommitParser::default();
        let parsed = parser.parse("feat(JIRA-42): add login form").unwrap();
        assert_eq!(parsed.kind, "feat");
        assert_eq!(parsed.issue.as_deref(), Some("JIRA-42"));
        assert_eq!(parsed.comment, "add login form");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let parser = CommitParser::default();
        let parsed = parser.parse("FIX: null pointer").unwrap();
        assert_eq!(parsed.kind, "fix");
        assert!(parser.is_fix(&parsed));
        assert_eq!(parsed.issue, None);
    }

    #[test]
    fn test_feature_and_feat_are_distinct_words() {
        let parser = CommitParser::default();
        assert_eq!(parser.parse("feature: x").unwrap().kind, "feature");
        assert_eq!(parser.parse("feat: x").unwrap().kind, "feat");
        assert!(parser.parse("feats: x").is_none());
    }

    #[test]
    fn test_rejects_non_conventional_summaries() {
        let parser = CommitParser::default();
        assert!(parser.parse("Merge branch 'develop'").is_none());
        assert!(parser.parse("fix:missing space").is_none());
        assert!(parser.parse("fix(a b): spaces in issue").is_none());
        assert!(parser.parse("unknown: type").is_none());
    }

    #[test]
    fn test_is_new_release() {
        let parser = CommitParser::default();
        assert!(!parser.is_new_release(&[]));
        assert!(!parser.is_new_release(&[commit("update readme")]));
        assert!(parser.is_new_release(&[commit("update readme"), commit("docs: readme")]));
    }

    #[test]
    fn test_custom_types() {
        let parser =
            CommitParser::new(&["hotfix".to_string()], &["hotfix".to_string()]).unwrap();
        let parsed = parser.parse("hotfix: patch").unwrap();
        assert!(parser.is_fix(&parsed));
        assert!(parser.parse("feat: nope").is_none());
        assert!(CommitParser::new(&[], &[]).is_err());
    }
}
