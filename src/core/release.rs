use crate::core::conventional::CommitParser;
use crate::core::manifest;
use crate::core::release_notes::ReleaseNotes;
use crate::core::version;
use crate::domain::model::{ProjectKind, ReleaseOutcome, ReleaseRequest};
use crate::domain::ports::{ConfigProvider, OutputSink, ReleasePublisher, Repository};
use crate::utils::error::{ReleaseError, Result};

pub const OUTPUT_NEW_RELEASE: &str = "new_release";
pub const OUTPUT_NEW_RELEASE_VERSION: &str = "new_release_version";

pub struct ReleaseEngine<R: Repository, P: ReleasePublisher, O: OutputSink, C: ConfigProvider> {
    repo: R,
    publisher: P,
    outputs: O,
    config: C,
    parser: CommitParser,
}

impl<R: Repository, P: ReleasePublisher, O: OutputSink, C: ConfigProvider>
    ReleaseEngine<R, P, O, C>
{
    pub fn new(repo: R, publisher: P, outputs: O, config: C) -> Result<Self> {
        let parser = CommitParser::new(config.commit_types(), config.fix_types())?;
        Ok(Self {
            repo,
            publisher,
            outputs,
            config,
            parser,
        })
    }

    pub async fn run(&self) -> Result<ReleaseOutcome> {
        let dry_run = self.config.dry_run();
        if dry_run {
            tracing::info!("🧪 dry-run mode: nothing will be tagged, pushed or published");
        }

        let project = manifest::detect_project(&self.repo)?;
        tracing::info!("📦 {} project detected", project);
        if project == ProjectKind::Unknown {
            return Err(ReleaseError::UnsupportedProject {
                workspace: self.repo.workspace().to_string(),
            });
        }

        let branch = self.repo.active_branch()?;
        let last_tag = version::select_last_tag(
            self.repo.merged_tags()?,
            &branch,
            self.config.release_branches(),
        );
        tracing::info!(
            "🏷️ current tag: {}",
            last_tag.as_ref().map(|t| t.name.as_str()).unwrap_or("None")
        );

        let commits = self
            .repo
            .commits_between(last_tag.as_ref().map(|t| t.commit.id.as_str()))?;
        if !commits.is_empty() {
            tracing::info!("Commits:");
            for commit in &commits {
                tracing::info!(" - {}", commit.summary);
            }
        }

        let new_release = self.parser.is_new_release(&commits);
        let mut outcome = ReleaseOutcome {
            project,
            branch: branch.clone(),
            current_tag: last_tag.as_ref().map(|t| t.name.clone()),
            commits,
            new_release,
            version: None,
            published: false,
            dry_run,
        };

        if new_release || dry_run {
            let manifest_version = manifest::read_version(&self.repo, project)?;
            let version_string = version::next_version(
                &manifest_version,
                &branch,
                self.config.release_branches(),
                last_tag.as_ref().map(|t| t.name.as_str()),
            )?;
            tracing::info!("🆕 new tag: {}", version_string);

            if !dry_run {
                self.publish(&version_string, &outcome).await?;
                outcome.published = true;
            }
            outcome.version = Some(version_string);
        }

        if !dry_run {
            self.outputs
                .set_output(OUTPUT_NEW_RELEASE, if new_release { "true" } else { "false" })?;
        }

        Ok(outcome)
    }

    async fn publish(&self, version_string: &str, outcome: &ReleaseOutcome) -> Result<()> {
        self.repo.create_tag(version_string)?;
        self.repo.push_tag(self.config.remote(), version_string)?;
        tracing::debug!("Pushed tag {} to {}", version_string, self.config.remote());

        let notes = ReleaseNotes::from_commits(version_string, &outcome.commits, &self.parser);
        let body = notes.render(self.config.notes_template())?;
        self.publisher
            .create_release(&ReleaseRequest::new(version_string, body))
            .await?;

        self.outputs
            .set_output(OUTPUT_NEW_RELEASE_VERSION, version_string)?;
        Ok(())
    }
}
