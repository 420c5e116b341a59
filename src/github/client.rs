//! GitHub REST client for repository metadata
//!
//! One read endpoint: `GET /repos/{owner}/{repo}`. The raw payload is mapped
//! into a [`RepositoryDescription`] with placeholders for absent fields.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::RepositorySource;
use crate::config::GitHubConfig;
use crate::constants::{github, placeholder};
use crate::types::{ReadmeError, RepositoryDescription, Result};

/// Metadata fetcher backed by the GitHub REST API
pub struct GitHubClient {
    api_base: String,
    user_agent: String,
    /// Optional, only raises rate limits
    token: Option<SecretString>,
    client: reqwest::Client,
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitHubClient {
    /// Build a client from config. `GITHUB_TOKEN` is picked up if set.
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReadmeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let token = std::env::var(github::TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token,
            client,
        })
    }

    /// Replace the token picked up from the environment
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.map(SecretString::from);
        self
    }
}

#[async_trait]
impl RepositorySource for GitHubClient {
    async fn fetch(&self, owner: &str, repo: &str) -> Result<RepositoryDescription> {
        let url = format!("{}/repos/{}/{}", self.api_base, owner, repo);
        debug!(%url, "Fetching repository metadata");

        let mut request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, github::ACCEPT)
            .header(reqwest::header::USER_AGENT, &self.user_agent);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ReadmeError::upstream(None, e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ReadmeError::NotFound {
                owner: owner.to_string(),
                repo: repo.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("error").to_string());
            return Err(ReadmeError::upstream(Some(status.as_u16()), message));
        }

        let payload: RepositoryPayload = response
            .json()
            .await
            .map_err(|e| ReadmeError::upstream(Some(status.as_u16()), e.to_string()))?;

        let description = payload.into_description(owner, repo);
        info!(
            repository = %description.canonical_url,
            stars = description.star_count,
            "Fetched repository metadata"
        );

        Ok(description)
    }
}

// Response types

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: Option<String>,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    license: Option<LicensePayload>,
    owner: Option<OwnerPayload>,
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LicensePayload {
    spdx_id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
    avatar_url: Option<String>,
}

/// Present and not blank
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RepositoryPayload {
    fn into_description(self, owner: &str, repo: &str) -> RepositoryDescription {
        let license = self
            .license
            .and_then(|l| non_blank(l.spdx_id).or_else(|| non_blank(l.name)));

        let (owner_login, owner_avatar_url) = match self.owner {
            Some(o) => (o.login, o.avatar_url),
            None => (owner.to_string(), None),
        };

        RepositoryDescription {
            name: non_blank(self.name).unwrap_or_else(|| repo.to_string()),
            description: non_blank(self.description)
                .unwrap_or_else(|| placeholder::NO_DESCRIPTION.to_string()),
            primary_language: non_blank(self.language)
                .unwrap_or_else(|| placeholder::NO_LANGUAGE.to_string()),
            topics: self.topics.unwrap_or_default(),
            star_count: self.stargazers_count,
            fork_count: self.forks_count,
            license,
            owner_login,
            owner_avatar_url,
            canonical_url: non_blank(self.html_url)
                .unwrap_or_else(|| format!("https://{}/{}/{}", github::HOST, owner, repo)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new(&GitHubConfig {
            api_base: server.uri(),
            ..Default::default()
        })
        .unwrap()
        .with_token(None)
    }

    #[tokio::test]
    async fn test_fetch_maps_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/widget"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "widget",
                "description": "A widget",
                "language": "Rust",
                "topics": ["cli", "tools"],
                "stargazers_count": 42,
                "forks_count": 7,
                "license": {"spdx_id": "MIT", "name": "MIT License"},
                "owner": {"login": "acme", "avatar_url": "https://avatars.example/acme"},
                "html_url": "https://github.com/acme/widget"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let desc = client(&server).fetch("acme", "widget").await.unwrap();

        assert_eq!(desc.name, "widget");
        assert_eq!(desc.description, "A widget");
        assert_eq!(desc.primary_language, "Rust");
        assert_eq!(desc.topics, vec!["cli", "tools"]);
        assert_eq!(desc.star_count, 42);
        assert_eq!(desc.fork_count, 7);
        assert_eq!(desc.license.as_deref(), Some("MIT"));
        assert_eq!(desc.owner_login, "acme");
        assert_eq!(
            desc.owner_avatar_url.as_deref(),
            Some("https://avatars.example/acme")
        );
        assert_eq!(desc.canonical_url, "https://github.com/acme/widget");
    }

    #[tokio::test]
    async fn test_fetch_defaults_for_missing_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/bare"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "bare",
                "description": null,
                "language": null,
                "stargazers_count": 0,
                "forks_count": 0,
                "license": null,
                "owner": {"login": "acme"}
            })))
            .mount(&server)
            .await;

        let desc = client(&server).fetch("acme", "bare").await.unwrap();

        assert_eq!(desc.description, "No description provided");
        assert_eq!(desc.primary_language, "Not specified");
        assert!(desc.topics.is_empty());
        assert_eq!(desc.license, None);
        assert_eq!(desc.canonical_url, "https://github.com/acme/bare");
    }

    #[tokio::test]
    async fn test_license_falls_back_to_name() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "w",
                "license": {"spdx_id": null, "name": "Custom License"},
                "owner": {"login": "acme"}
            })))
            .mount(&server)
            .await;

        let desc = client(&server).fetch("acme", "w").await.unwrap();
        assert_eq!(desc.license.as_deref(), Some("Custom License"));
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/acme/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).fetch("acme", "missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("acme/missing"));
    }

    #[tokio::test]
    async fn test_other_status_is_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(
                serde_json::json!({"message": "API rate limit exceeded"}),
            ))
            .mount(&server)
            .await;

        let err = client(&server).fetch("acme", "widget").await.unwrap_err();
        match &err {
            ReadmeError::Upstream { status, message } => {
                assert_eq!(*status, Some(403));
                assert_eq!(message, "API rate limit exceeded");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.kind().http_status(), 502);
    }

    #[tokio::test]
    async fn test_token_sent_as_bearer() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("authorization", "Bearer ghp_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "w",
                "owner": {"login": "acme"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .with_token(Some("ghp_test".into()))
            .fetch("acme", "w")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_without_status() {
        let client = GitHubClient::new(&GitHubConfig {
            api_base: "http://127.0.0.1:1".into(),
            timeout_secs: 2,
            ..Default::default()
        })
        .unwrap();

        let err = client.fetch("acme", "widget").await.unwrap_err();
        assert!(matches!(err, ReadmeError::Upstream { status: None, .. }));
    }
}
