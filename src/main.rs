use clap::Parser;
use release_tagger::utils::{logger, validation::Validate};
use release_tagger::{
    CliConfig, GitCli, GitHubClient, GithubOutput, ReleaseEngine, ReleaseError, ReleaseSettings,
};

fn exit_with(e: &ReleaseError) -> ! {
    tracing::error!(
        "❌ Release failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

fn build_engine(
    config: &CliConfig,
    settings: ReleaseSettings,
) -> release_tagger::Result<ReleaseEngine<GitCli, GitHubClient, GithubOutput, ReleaseSettings>> {
    if config.trust_workspace {
        GitCli::trust_directory(&config.workspace)?;
    }
    let repo = GitCli::open(&config.workspace)?;

    let publisher = GitHubClient::new(
        &config.api_url,
        config.repository.as_deref().unwrap_or_default(),
        config.github_token.as_deref().unwrap_or_default(),
    )?;
    let outputs = GithubOutput::new(config.github_output.clone());

    ReleaseEngine::new(repo, publisher, outputs, settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting release-tagger");
    tracing::debug!(
        "Workspace: {}, repository: {:?}, dry-run: {}",
        config.workspace.display(),
        config.repository,
        config.is_dry_run()
    );

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let settings = match config.resolve_settings() {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    let engine = match build_engine(&config, settings) {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };

    match engine.run().await {
        Ok(outcome) => {
            match (&outcome.version, outcome.published) {
                (Some(version), true) => println!("✅ Released {}", version),
                (Some(version), false) => println!("🧪 Next version would be {}", version),
                (None, _) => println!(
                    "✅ No release-worthy commits since {}",
                    outcome
                        .current_tag
                        .as_deref()
                        .unwrap_or("the beginning of history")
                ),
            }
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}
