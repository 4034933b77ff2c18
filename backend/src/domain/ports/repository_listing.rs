//! Ports for listing a developer's public code repositories.
//!
//! The driven [`RepositoryListingSource`] talks to the upstream hosting API;
//! the driving [`RepositoryListingQuery`] is what HTTP handlers call.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;

use super::define_port_error;

/// Longest login the upstream accepts.
pub const GITHUB_USERNAME_MAX: usize = 39;

/// Validation errors for [`GithubUsername`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GithubUsernameError {
    #[error("username must not be empty")]
    Empty,
    #[error("username must be at most {max} characters")]
    TooLong { max: usize },
    #[error("username may only contain letters, digits and single inner hyphens")]
    InvalidCharacters,
}

/// Login name on the code hosting service.
///
/// # Examples
/// ```
/// use profiles::domain::ports::GithubUsername;
///
/// assert!(GithubUsername::new("octo-cat").is_ok());
/// assert!(GithubUsername::new("-octocat").is_err());
/// assert!(GithubUsername::new("octo--cat").is_err());
/// assert!(GithubUsername::new("../admin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubUsername(String);

impl GithubUsername {
    /// Validate a login.
    pub fn new(raw: impl Into<String>) -> Result<Self, GithubUsernameError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(GithubUsernameError::Empty);
        }
        if raw.chars().count() > GITHUB_USERNAME_MAX {
            return Err(GithubUsernameError::TooLong {
                max: GITHUB_USERNAME_MAX,
            });
        }
        let charset_ok = raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !charset_ok || raw.starts_with('-') || raw.ends_with('-') || raw.contains("--") {
            return Err(GithubUsernameError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GithubUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public repository summary returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeRepository {
    #[schema(example = "hello-world")]
    pub name: String,
    #[schema(example = "octocat/hello-world")]
    pub full_name: String,
    #[schema(example = "https://github.com/octocat/hello-world")]
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub watchers: u64,
    pub forks: u64,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
}

define_port_error! {
    /// Errors surfaced while listing repositories upstream.
    pub enum RepositoryListingError {
        /// The upstream has no such account.
        NotFound { username: String } =>
            "no upstream account named {username}",
        /// The upstream answered with an unexpected status.
        Status { status: u16, message: String } =>
            "repository listing returned status {status}: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "repository listing timed out: {message}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "repository listing transport failed: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "repository listing decode failed: {message}",
    }
}

/// Driven port for the upstream repository listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryListingSource: Send + Sync {
    /// Fetch the most recently created public repositories of `username`,
    /// newest first, at most five.
    async fn list_recent(
        &self,
        username: &GithubUsername,
    ) -> Result<Vec<CodeRepository>, RepositoryListingError>;
}

/// Driving port used by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryListingQuery: Send + Sync {
    /// List repositories for a raw username taken from a request path.
    async fn recent_repositories(&self, raw_username: &str) -> Result<Vec<CodeRepository>, Error>;
}

/// Fixture source returning one canned repository per user.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRepositoryListingSource;

#[async_trait]
impl RepositoryListingSource for FixtureRepositoryListingSource {
    async fn list_recent(
        &self,
        username: &GithubUsername,
    ) -> Result<Vec<CodeRepository>, RepositoryListingError> {
        Ok(vec![CodeRepository {
            name: "hello-world".to_owned(),
            full_name: format!("{username}/hello-world"),
            html_url: format!("https://github.com/{username}/hello-world"),
            description: None,
            language: Some("Rust".to_owned()),
            stars: 0,
            watchers: 0,
            forks: 0,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a")]
    #[case("octocat")]
    #[case("octo-cat-2")]
    #[case(&"a".repeat(GITHUB_USERNAME_MAX))]
    fn accepts_valid_logins(#[case] raw: &str) {
        assert!(GithubUsername::new(raw).is_ok());
    }

    #[rstest]
    #[case("", GithubUsernameError::Empty)]
    #[case(&"a".repeat(GITHUB_USERNAME_MAX + 1), GithubUsernameError::TooLong { max: GITHUB_USERNAME_MAX })]
    #[case("octo cat", GithubUsernameError::InvalidCharacters)]
    #[case("octo/cat", GithubUsernameError::InvalidCharacters)]
    #[case("octo-", GithubUsernameError::InvalidCharacters)]
    #[case("octo--cat", GithubUsernameError::InvalidCharacters)]
    #[case("ökö", GithubUsernameError::InvalidCharacters)]
    fn rejects_invalid_logins(#[case] raw: &str, #[case] expected: GithubUsernameError) {
        assert_eq!(GithubUsername::new(raw), Err(expected));
    }

    #[rstest]
    fn status_error_formats_message() {
        let err = RepositoryListingError::status(502_u16, "bad gateway");
        assert_eq!(
            err.to_string(),
            "repository listing returned status 502: bad gateway"
        );
    }
}
