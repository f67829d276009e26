pub mod toml_config;

use crate::core::release_notes::{self, DEFAULT_TEMPLATE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use toml_config::ReleaseConfig;

#[cfg(feature = "cli")]
use crate::adapters::github::DEFAULT_API_URL;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use crate::utils::validation;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "release-tagger")]
#[command(about = "Tags and publishes a release when conventional commits landed since the last tag")]
pub struct CliConfig {
    /// Path of the git checkout
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: PathBuf,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Repository slug, owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File receiving step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,

    /// Set to "true" by the Actions runner; anything else means dry-run
    #[arg(long, env = "GITHUB_ACTIONS")]
    pub github_actions: Option<String>,

    /// Compute the next version without tagging or publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Optional TOML settings file
    #[arg(long, env = "RELEASE_TAGGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Add the workspace to git's safe.directory list before opening it.
    /// Writes the global git config, so HOME must be writable.
    #[arg(long)]
    pub trust_workspace: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.github_actions.as_deref() != Some("true")
    }

    pub fn load_release_config(&self) -> Result<ReleaseConfig> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                ReleaseConfig::from_file(path)
            }
            None => Ok(ReleaseConfig::default()),
        }
    }

    pub fn resolve_settings(&self) -> Result<ReleaseSettings> {
        let release_config = self.load_release_config()?;
        ReleaseSettings::from_config(release_config, self.is_dry_run())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("workspace", &self.workspace.to_string_lossy())?;
        validation::validate_url("api_url", &self.api_url)?;

        if let Some(repository) = &self.repository {
            validation::validate_repository_slug("repository", repository)?;
        }

        if !self.is_dry_run() {
            let token = validation::validate_required_field("github_token", &self.github_token)?;
            validation::validate_non_empty_string("github_token", token)?;
            validation::validate_required_field("repository", &self.repository)?;
            validation::validate_required_field("github_output", &self.github_output)?;
        }

        Ok(())
    }
}

/// Fully resolved settings handed to the release engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    pub dry_run: bool,
    pub release_branches: Vec<String>,
    pub remote: String,
    pub commit_types: Vec<String>,
    pub fix_types: Vec<String>,
    pub notes_template: String,
}

impl ReleaseSettings {
    pub fn from_config(config: ReleaseConfig, dry_run: bool) -> Result<Self> {
        config.validate()?;

        let notes_template = match &config.notes.template {
            Some(path) => release_notes::load_template(path)?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        Ok(Self {
            dry_run,
            release_branches: config.branches.release,
            remote: config.git.remote,
            commit_types: config.commits.types,
            fix_types: config.commits.fix_types,
            notes_template,
        })
    }
}

impl Default for ReleaseSettings {
    fn default() -> Self {
        let config = ReleaseConfig::default();
        Self {
            dry_run: true,
            release_branches: config.branches.release,
            remote: config.git.remote,
            commit_types: config.commits.types,
            fix_types: config.commits.fix_types,
            notes_template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl ConfigProvider for ReleaseSettings {
    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn release_branches(&self) -> &[String] {
        &self.release_branches
    }

    fn remote(&self) -> &str {
        &self.remote
    }

    fn commit_types(&self) -> &[String] {
        &self.commit_types
    }

    fn fix_types(&self) -> &[String] {
        &self.fix_types
    }

    fn notes_template(&self) -> &str {
        &self.notes_template
    }
}
