pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GitCli, GitHubClient, GithubOutput};
pub use config::ReleaseSettings;
pub use core::release::ReleaseEngine;
pub use utils::error::{ReleaseError, Result};
