use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("git {command} failed: {message}")]
    GitError { command: String, message: String },

    #[error("Invalid manifest {file}: {message}")]
    ManifestError { file: String, message: String },

    #[error("No supported project manifest (pom.xml or package.json) found in {workspace}")]
    UnsupportedProject { workspace: String },

    #[error("Build number of tag {tag} cannot be incremented")]
    BuildNumberOverflow { tag: String },

    #[error("GitHub API returned {status}: {body}")]
    GitHubApiError { status: u16, body: String },

    #[error("Release notes template error: {message}")]
    TemplateError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Repository,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the binary for this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ReleaseError {
    pub fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::GitError {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn manifest(file: impl Into<String>, message: impl Into<String>) -> Self {
        ReleaseError::ManifestError {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReleaseError::ConfigError { .. }
            | ReleaseError::MissingConfigError { .. }
            | ReleaseError::InvalidConfigValueError { .. }
            | ReleaseError::ConfigValidationError { .. }
            | ReleaseError::TemplateError { .. } => ErrorCategory::Configuration,
            ReleaseError::GitError { .. } | ReleaseError::UnsupportedProject { .. } => {
                ErrorCategory::Repository
            }
            ReleaseError::HttpError(_) | ReleaseError::GitHubApiError { .. } => {
                ErrorCategory::Network
            }
            ReleaseError::ManifestError { .. }
            | ReleaseError::SerializationError(_)
            | ReleaseError::BuildNumberOverflow { .. } => ErrorCategory::Data,
            ReleaseError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ReleaseError::HttpError(e) if e.is_timeout() || e.is_connect() => {
                ErrorSeverity::Medium
            }
            ReleaseError::GitHubApiError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            ReleaseError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReleaseError::HttpError(_) => "Check network access to the GitHub API and retry",
            ReleaseError::GitHubApiError { status: 401, .. }
            | ReleaseError::GitHubApiError { status: 403, .. } => {
                "Make sure GITHUB_TOKEN has `contents: write` permission"
            }
            ReleaseError::GitHubApiError { status: 422, .. } => {
                "A release for this tag probably exists already; remove it or bump the version"
            }
            ReleaseError::GitHubApiError { .. } => "Retry later or inspect the API response body",
            ReleaseError::GitError { .. } => {
                "Run inside a full clone (fetch-depth: 0) and check git permissions; try --trust-workspace"
            }
            ReleaseError::UnsupportedProject { .. } => {
                "Add a pom.xml or package.json at the repository root"
            }
            ReleaseError::ManifestError { .. } => {
                "Make sure the manifest declares a literal version at the top level"
            }
            ReleaseError::SerializationError(_) => "Check that the manifest is valid JSON",
            ReleaseError::BuildNumberOverflow { .. } => {
                "Bump the manifest version so pre-release numbering starts over"
            }
            ReleaseError::TemplateError { .. } => "Check the notes.template path in the config file",
            ReleaseError::MissingConfigError { .. } => {
                "Set the corresponding GITHUB_* environment variable or command line flag"
            }
            ReleaseError::ConfigError { .. }
            | ReleaseError::InvalidConfigValueError { .. }
            | ReleaseError::ConfigValidationError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            ReleaseError::IoError(_) => "Check file permissions and free disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Repository => format!("Repository problem: {}", self),
            ErrorCategory::Network => format!("Could not publish the release: {}", self),
            ErrorCategory::Data => format!("Could not read the project version: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
