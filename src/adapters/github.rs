use crate::domain::model::ReleaseRequest;
use crate::domain::ports::ReleasePublisher;
use crate::utils::error::{ReleaseError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, repository: &str, token: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            token: token.to_string(),
        })
    }

    pub fn releases_endpoint(&self) -> String {
        format!("{}/repos/{}/releases", self.api_url, self.repository)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.token)).map_err(|_| {
            ReleaseError::InvalidConfigValueError {
                field: "github_token".to_string(),
                value: "<redacted>".to_string(),
                reason: "Token contains characters not allowed in an HTTP header".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }
}

#[async_trait]
impl ReleasePublisher for GitHubClient {
    async fn create_release(&self, release: &ReleaseRequest) -> Result<()> {
        let endpoint = self.releases_endpoint();
        tracing::debug!("Creating release {} via {}", release.tag_name, endpoint);

        let response = self
            .client
            .post(&endpoint)
            .headers(self.headers()?)
            .json(release)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::CREATED {
            tracing::info!("🚀 Release {} created", release.tag_name);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!("GitHub API responded {}: {}", status, body);
        Err(ReleaseError::GitHubApiError {
            status: status.as_u16(),
            body,
        })
    }
}
