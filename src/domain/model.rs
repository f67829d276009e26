use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub id: String,
    /// First line of the commit message.
    pub summary: String,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    pub name: String,
    /// The commit the tag points at, peeled through annotated tags.
    pub commit: CommitInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionalCommit {
    pub kind: String,
    pub issue: Option<String>,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Maven,
    NodeJs,
    Unknown,
}

impl ProjectKind {
    pub fn manifest_file(&self) -> Option<&'static str> {
        match self {
            ProjectKind::Maven => Some("pom.xml"),
            ProjectKind::NodeJs => Some("package.json"),
            ProjectKind::Unknown => None,
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectKind::Maven => "maven",
            ProjectKind::NodeJs => "nodejs",
            ProjectKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Payload of `POST /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub prerelease: bool,
    /// GitHub expects the string form here, not a JSON boolean.
    pub make_latest: String,
    pub body: String,
}

impl ReleaseRequest {
    pub fn new(tag_name: &str, body: String) -> Self {
        let prerelease = crate::core::version::is_prerelease(tag_name);
        Self {
            tag_name: tag_name.to_string(),
            name: tag_name.to_string(),
            prerelease,
            make_latest: if prerelease { "false" } else { "true" }.to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseOutcome {
    pub project: ProjectKind,
    pub branch: String,
    pub current_tag: Option<String>,
    pub commits: Vec<CommitInfo>,
    pub new_release: bool,
    pub version: Option<String>,
    pub published: bool,
    pub dry_run: bool,
}
