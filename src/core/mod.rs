pub mod conventional;
pub mod manifest;
pub mod release;
pub mod release_notes;
pub mod version;

pub use crate::domain::model::{CommitInfo, ProjectKind, ReleaseOutcome, ReleaseRequest, TagInfo};
pub use crate::domain::ports::{ConfigProvider, OutputSink, ReleasePublisher, Repository};
pub use crate::utils::error::Result;
