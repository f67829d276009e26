use crate::core::conventional::{DEFAULT_COMMIT_TYPES, DEFAULT_FIX_TYPES};
use crate::utils::error::{ReleaseError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional settings file. Every table may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub commits: CommitsConfig,
    pub branches: BranchesConfig,
    pub git: GitConfig,
    pub notes: NotesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitsConfig {
    pub types: Vec<String>,
    pub fix_types: Vec<String>,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        Self {
            types: DEFAULT_COMMIT_TYPES.iter().map(|t| t.to_string()).collect(),
            fix_types: DEFAULT_FIX_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchesConfig {
    pub release: Vec<String>,
}

impl Default for BranchesConfig {
    fn default() -> Self {
        Self {
            release: vec!["master".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    pub template: Option<PathBuf>,
}

impl ReleaseConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReleaseError::IoError)?;
        let mut config = Self::from_toml_str(&content)?;

        // Relative template paths are resolved against the config file.
        if let (Some(template), Some(dir)) = (&config.notes.template, path.as_ref().parent()) {
            if template.is_relative() {
                config.notes.template = Some(dir.join(template));
            }
        }
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReleaseError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RELEASE_REMOTE})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReleaseError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_list("commits.types", &self.commits.types)?;
        validation::validate_non_empty_list("branches.release", &self.branches.release)?;
        validation::validate_non_empty_string("git.remote", &self.git.remote)?;

        let word = Regex::new(r"^\w+$").map_err(|e| ReleaseError::ConfigError {
            message: e.to_string(),
        })?;
        for commit_type in self.commits.types.iter().chain(&self.commits.fix_types) {
            if !word.is_match(commit_type) {
                return Err(ReleaseError::InvalidConfigValueError {
                    field: "commits.types".to_string(),
                    value: commit_type.clone(),
                    reason: "Commit types must be a single word".to_string(),
                });
            }
        }

        if let Some(template) = &self.notes.template {
            validation::validate_path("notes.template", &template.to_string_lossy())?;
        }

        Ok(())
    }
}

impl Validate for ReleaseConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
