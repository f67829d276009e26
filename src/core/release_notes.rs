use crate::core::conventional::CommitParser;
use crate::domain::model::{CommitInfo, ConventionalCommit};
use crate::utils::error::{ReleaseError, Result};
use regex::Regex;
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/release-notes.md");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub version: String,
    pub features: Vec<ConventionalCommit>,
    pub fixes: Vec<ConventionalCommit>,
    pub other: Vec<String>,
}

impl ReleaseNotes {
    pub fn from_commits(version: &str, commits: &[CommitInfo], parser: &CommitParser) -> Self {
        let mut notes = ReleaseNotes {
            version: version.to_string(),
            ..Default::default()
        };

        for commit in commits {
            match parser.parse(&commit.summary) {
                Some(parsed) if parser.is_fix(&parsed) => notes.fixes.push(parsed),
                Some(parsed) => notes.features.push(parsed),
                None => notes.other.push(commit.summary.clone()),
            }
        }

        notes
    }

    /// Renders `template`, replacing `{{version}}`, `{{features}}`, `{{fixes}}`
    /// and `{{other}}`. Empty sections render as nothing.
    pub fn render(&self, template: &str) -> Result<String> {
        let placeholder = Regex::new(r"\{\{\s*(\w+)\s*\}\}").map_err(|e| {
            ReleaseError::TemplateError {
                message: e.to_string(),
            }
        })?;

        let mut unknown = Vec::new();
        let rendered = placeholder.replace_all(template, |caps: &regex::Captures| {
            match &caps[1] {
                "version" => self.version.clone(),
                "features" => commit_section("Features", &self.features),
                "fixes" => commit_section("Bug Fixes", &self.fixes),
                "other" => list_section("Other Changes", self.other.iter().cloned()),
                name => {
                    unknown.push(name.to_string());
                    String::new()
                }
            }
        });

        if !unknown.is_empty() {
            return Err(ReleaseError::TemplateError {
                message: format!("Unknown placeholders: {}", unknown.join(", ")),
            });
        }

        Ok(collapse_blank_lines(&rendered))
    }
}

pub fn load_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ReleaseError::TemplateError {
        message: format!("Cannot read {}: {}", path.display(), e),
    })
}

fn commit_section(title: &str, commits: &[ConventionalCommit]) -> String {
    list_section(
        title,
        commits.iter().map(|c| match &c.issue {
            Some(issue) => format!("**{}:** {}", issue, c.comment),
            None => c.comment.clone(),
        }),
    )
}

fn list_section(title: &str, items: impl Iterator<Item = String>) -> String {
    let bullets: Vec<String> = items.map(|item| format!("- {}", item)).collect();
    if bullets.is_empty() {
        return String::new();
    }
    format!("### {}\n\n{}\n", title, bullets.join("\n"))
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    format!("{}\n", out.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commits(summaries: &[&str]) -> Vec<CommitInfo> {
        summaries
            .iter()
            .enumerate()
            .map(|(i, s)| CommitInfo {
                id: i.to_string(),
                summary: s.to_string(),
                committed_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_groups_commits() {
        let parser = CommitParser::default();
        let notes = ReleaseNotes::from_commits(
            "1.0.0",
            &commits(&["feat(UI-1): new page", "fix: crash", "tidy up", "chore: deps"]),
            &parser,
        );
        assert_eq!(notes.features.len(), 2);
        assert_eq!(notes.fixes.len(), 1);
        assert_eq!(notes.other, vec!["tidy up".to_string()]);
    }

    #[test]
    fn test_render_default_template() {
        let parser = CommitParser::default();
        let notes = ReleaseNotes::from_commits(
            "v2.0.0-develop.3",
            &commits(&["feat(UI-1): new page", "fix: crash"]),
            &parser,
        );
        let rendered = notes.render(DEFAULT_TEMPLATE).unwrap();

        assert!(rendered.contains("v2.0.0-develop.3"));
        assert!(rendered.contains("### Features\n\n- **UI-1:** new page"));
        assert!(rendered.contains("### Bug Fixes\n\n- crash"));
        assert!(!rendered.contains("Other Changes"));
        assert!(!rendered.contains("\n\n\n"));
    }

    #[test]
    fn test_render_rejects_unknown_placeholder() {
        let notes = ReleaseNotes::default();
        assert!(matches!(
            notes.render("{{ version }} {{ author }}"),
            Err(ReleaseError::TemplateError { .. })
        ));
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb\n\n"), "a\n\nb\n");
    }
}
