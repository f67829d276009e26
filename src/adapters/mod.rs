// Adapters layer: concrete implementations of the domain ports.

pub mod git;
pub mod github;
pub mod output;

pub use git::GitCli;
pub use github::GitHubClient;
pub use output::GithubOutput;
