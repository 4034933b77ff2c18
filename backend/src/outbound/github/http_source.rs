//! Reqwest-backed GitHub repository listing adapter.
//!
//! Owns transport details only: URL construction, client credentials, the
//! request timeout, status mapping and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::RepositoryDto;
use crate::domain::ports::{
    CodeRepository, GithubUsername, RepositoryListingError, RepositoryListingSource,
};

/// Number of repositories requested per listing.
pub const LISTING_PAGE_SIZE: usize = 5;

const USER_AGENT: &str = concat!("profiles/", env!("CARGO_PKG_VERSION"));

/// OAuth application credentials sent as HTTP basic auth.
#[derive(Clone)]
pub struct GithubCredentials {
    client_id: String,
    client_secret: Zeroizing<String>,
}

impl GithubCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Zeroizing::new(client_secret.into()),
        }
    }
}

impl std::fmt::Debug for GithubCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"**redacted**")
            .finish()
    }
}

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum GithubSourceBuildError {
    #[error("GitHub API URL cannot carry a path: {url}")]
    InvalidBaseUrl { url: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Repository listing source calling `GET /users/{name}/repos`.
pub struct GithubHttpSource {
    client: Client,
    base_url: Url,
    credentials: Option<GithubCredentials>,
}

impl GithubHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` cannot hold path segments or the
    /// reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: Option<GithubCredentials>,
        timeout: Duration,
    ) -> Result<Self, GithubSourceBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(GithubSourceBuildError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    fn listing_url(&self, username: &GithubUsername) -> Result<Url, RepositoryListingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RepositoryListingError::transport("GitHub API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["users", username.as_str(), "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &LISTING_PAGE_SIZE.to_string())
            .append_pair("sort", "created")
            .append_pair("direction", "desc");
        Ok(url)
    }
}

#[async_trait]
impl RepositoryListingSource for GithubHttpSource {
    async fn list_recent(
        &self,
        username: &GithubUsername,
    ) -> Result<Vec<CodeRepository>, RepositoryListingError> {
        let mut request = self
            .client
            .get(self.listing_url(username)?)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(
                &credentials.client_id,
                Some(credentials.client_secret.as_str()),
            );
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryListingError::not_found(username.as_str()));
        }
        if !status.is_success() {
            return Err(RepositoryListingError::status(
                status.as_u16(),
                body_preview(body.as_ref()),
            ));
        }

        parse_repositories(body.as_ref())
    }
}

fn parse_repositories(body: &[u8]) -> Result<Vec<CodeRepository>, RepositoryListingError> {
    let decoded: Vec<RepositoryDto> = serde_json::from_slice(body).map_err(|error| {
        RepositoryListingError::decode(format!("invalid repository listing JSON: {error}"))
    })?;
    Ok(decoded
        .into_iter()
        .take(LISTING_PAGE_SIZE)
        .map(CodeRepository::from)
        .collect())
}

fn map_transport_error(error: reqwest::Error) -> RepositoryListingError {
    if error.is_timeout() {
        RepositoryListingError::timeout(error.to_string())
    } else {
        RepositoryListingError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
