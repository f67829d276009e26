use crate::domain::model::{CommitInfo, TagInfo};
use crate::domain::ports::Repository;
use crate::utils::error::{ReleaseError, Result};
use chrono::DateTime;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Full message with a record separator; multi-line bodies stay in one record.
const LOG_FORMAT: &str = "--format=%H%x1f%ct%x1f%B%x1e";
const RECORD_SEPARATOR: char = '\u{1e}';

/// `Repository` backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    workspace: PathBuf,
    display: String,
}

impl GitCli {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workspace = path.as_ref().to_path_buf();
        let repo = Self {
            display: workspace.display().to_string(),
            workspace,
        };

        repo.run(&["rev-parse", "--git-dir"]).map_err(|e| match e {
            ReleaseError::GitError { command, message } => ReleaseError::GitError {
                command,
                message: format!("{} is not a usable git repository: {}", repo.display, message),
            },
            other => other,
        })?;

        tracing::debug!("Opened git repository at {}", repo.display);
        Ok(repo)
    }

    /// Marks `path` as safe for git even when owned by another user,
    /// which is the usual situation for mounted CI workspaces.
    pub fn trust_directory<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref().display().to_string();
        let args = ["config", "--global", "--add", "safe.directory", path.as_str()];
        let output = Command::new("git")
            .args(args)
            .output()
            .map_err(|e| ReleaseError::git(args.join(" "), format!("cannot execute git: {}", e)))?;
        check_status(&args, &output)?;
        tracing::info!("🔓 Added {} to git safe.directory", path);
        Ok(())
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!("git {}", args.join(" "));
        Command::new("git")
            .arg("-C")
            .arg(&self.workspace)
            .args(args)
            .output()
            .map_err(|e| ReleaseError::git(args.join(" "), format!("cannot execute git: {}", e)))
    }

    fn run_raw(&self, args: &[&str]) -> Result<Vec<u8>> {
        let output = self.output(args)?;
        check_status(args, &output)?;
        Ok(output.stdout)
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let stdout = self.run_raw(args)?;
        Ok(String::from_utf8_lossy(&stdout).trim_end().to_string())
    }

    fn log(&self, args: &[&str]) -> Result<Vec<CommitInfo>> {
        let mut full = vec!["log", LOG_FORMAT];
        full.extend_from_slice(args);
        let stdout = self.run(&full)?;
        stdout
            .split(RECORD_SEPARATOR)
            .map(|record| record.trim_start_matches('\n'))
            .filter(|record| !record.is_empty())
            .map(parse_commit_line)
            .collect()
    }
}

fn check_status(args: &[&str], output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    Err(ReleaseError::git(
        args.join(" "),
        if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        },
    ))
}

fn parse_commit_line(record: &str) -> Result<CommitInfo> {
    let mut fields = record.splitn(3, '\u{1f}');
    let (Some(id), Some(timestamp), message) = (fields.next(), fields.next(), fields.next()) else {
        return Err(ReleaseError::git("log", format!("unexpected output record: {}", record)));
    };

    let committed_at = timestamp
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .ok_or_else(|| ReleaseError::git("log", format!("invalid commit time: {}", timestamp)))?;

    Ok(CommitInfo {
        id: id.to_string(),
        summary: message
            .unwrap_or_default()
            .lines()
            .next()
            .unwrap_or_default()
            .trim_end()
            .to_string(),
        committed_at,
    })
}

impl Repository for GitCli {
    fn workspace(&self) -> &str {
        &self.display
    }

    fn active_branch(&self) -> Result<String> {
        self.run(&["symbolic-ref", "--short", "HEAD"]).map_err(|e| match e {
            ReleaseError::GitError { command, .. } => ReleaseError::GitError {
                command,
                message: "HEAD is detached; check out a branch before releasing".to_string(),
            },
            other => other,
        })
    }

    fn merged_tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.run(&["tag", "--merged", "HEAD"])?;
        let mut tags = Vec::new();
        for name in names.lines().map(str::trim).filter(|n| !n.is_empty()) {
            let reference = format!("refs/tags/{}", name);
            let commit = self
                .log(&["-1", reference.as_str()])?
                .into_iter()
                .next()
                .ok_or_else(|| ReleaseError::git("log", format!("tag {} has no commit", name)))?;
            tags.push(TagInfo {
                name: name.to_string(),
                commit,
            });
        }
        tracing::debug!("Found {} tags merged into HEAD", tags.len());
        Ok(tags)
    }

    fn commits_between(&self, start: Option<&str>) -> Result<Vec<CommitInfo>> {
        let range = match start {
            Some(start) => format!("{}..HEAD", start),
            None => "HEAD".to_string(),
        };
        self.log(&[range.as_str()])
    }

    fn file_at_head(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let object = format!("HEAD:{}", path);
        let exists = self.output(&["cat-file", "-e", object.as_str()])?;
        if !exists.status.success() {
            return Ok(None);
        }
        self.run_raw(&["cat-file", "blob", object.as_str()]).map(Some)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.run(&["tag", name])?;
        tracing::info!("🏷️ Created tag {}", name);
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{}", name);
        self.run(&["push", remote, refspec.as_str()])?;
        tracing::info!("⬆️ Pushed tag {} to {}", name, remote);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commit_line() {
        let commit = parse_commit_line("abc123\u{1f}1700000000\u{1f}feat: a: b").unwrap();
        assert_eq!(commit.id, "abc123");
        assert_eq!(commit.summary, "feat: a: b");
        assert_eq!(commit.committed_at.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_parse_commit_line_keeps_first_line_only() {
        let commit =
            parse_commit_line("abc123\u{1f}1700000000\u{1f}fix(X): a\nwrapped\n\nbody\n").unwrap();
        assert_eq!(commit.summary, "fix(X): a");
    }

    #[test]
    fn test_parse_commit_line_rejects_garbage() {
        assert!(parse_commit_line("no separators").is_err());
        assert!(parse_commit_line("abc\u{1f}soon\u{1f}x").is_err());
    }
}
