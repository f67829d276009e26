use crate::domain::ports::OutputSink;
use crate::utils::error::{ReleaseError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Appends `name=value` lines to the file named by `GITHUB_OUTPUT`.
#[derive(Debug, Clone)]
pub struct GithubOutput {
    path: Option<PathBuf>,
}

impl GithubOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl OutputSink for GithubOutput {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| ReleaseError::MissingConfigError {
                field: "github_output".to_string(),
            })?;

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}={}", name, value)?;
        tracing::debug!("Output {}={} written to {}", name, value, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_outputs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        std::fs::write(&path, "existing=1\n").unwrap();

        let sink = GithubOutput::new(Some(path.clone()));
        sink.set_output("new_release", "true").unwrap();
        sink.set_output("new_release_version", "1.2.0").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing=1\nnew_release=true\nnew_release_version=1.2.0\n");
    }

    #[test]
    fn test_missing_output_file_is_config_error() {
        let sink = GithubOutput::new(None);
        assert!(matches!(
            sink.set_output("new_release", "false"),
            Err(ReleaseError::MissingConfigError { .. })
        ));
    }
}
