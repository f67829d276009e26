use crate::domain::model::{CommitInfo, ReleaseRequest, TagInfo};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read and write access to the checked out repository.
///
/// Revisions are resolved against `HEAD`, which is the tip of the active
/// branch in a normal CI checkout.
pub trait Repository: Send + Sync {
    fn workspace(&self) -> &str;
    fn active_branch(&self) -> Result<String>;
    fn merged_tags(&self) -> Result<Vec<TagInfo>>;
    /// Commits in `start..HEAD`, newest first. `None` means the whole history.
    fn commits_between(&self, start: Option<&str>) -> Result<Vec<CommitInfo>>;
    fn file_at_head(&self, path: &str) -> Result<Option<Vec<u8>>>;
    fn create_tag(&self, name: &str) -> Result<()>;
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;
}

#[async_trait]
pub trait ReleasePublisher: Send + Sync {
    async fn create_release(&self, release: &ReleaseRequest) -> Result<()>;
}

pub trait OutputSink: Send + Sync {
    fn set_output(&self, name: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn dry_run(&self) -> bool;
    fn release_branches(&self) -> &[String];
    fn remote(&self) -> &str;
    fn commit_types(&self) -> &[String];
    fn fix_types(&self) -> &[String];
    fn notes_template(&self) -> &str;
}
