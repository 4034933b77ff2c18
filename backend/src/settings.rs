//! Application settings loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `PROFILES_*` environment variables and an
//! optional configuration file. Unset values fall back to the defaults
//! returned by the accessors below.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::github::GithubCredentials;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the profiles service.
///
/// Holds secrets, so there is no `Debug` impl.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILES")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds a request may wait for a pooled connection.
    pub db_connect_timeout_secs: Option<u64>,
    /// Base URL of the GitHub REST API.
    pub github_api_url: Option<String>,
    /// OAuth application client id sent as basic auth to GitHub.
    pub github_client_id: Option<String>,
    /// OAuth application client secret sent as basic auth to GitHub.
    pub github_client_secret: Option<String>,
    /// Upstream request timeout in seconds.
    pub github_timeout_secs: Option<u64>,
    /// Shared secret used to verify bearer tokens.
    pub token_secret: Option<String>,
    /// JSON file of `{id, name, avatar?}` owner records loaded at startup.
    pub seed_users_file: Option<PathBuf>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the configured GitHub API base URL.
    ///
    /// # Errors
    /// Returns [`url::ParseError`] when the configured value is not a URL.
    pub fn github_api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(
            self.github_api_url
                .as_deref()
                .unwrap_or(DEFAULT_GITHUB_API_URL),
        )
    }

    /// Return the upstream timeout, falling back to ten seconds.
    pub fn github_timeout(&self) -> Duration {
        Duration::from_secs(
            self.github_timeout_secs
                .unwrap_or(DEFAULT_GITHUB_TIMEOUT_SECS),
        )
    }

    /// Return GitHub credentials when both halves are configured.
    pub fn github_credentials(&self) -> Option<GithubCredentials> {
        match (&self.github_client_id, &self.github_client_secret) {
            (Some(id), Some(secret)) if !id.trim().is_empty() && !secret.is_empty() => {
                Some(GithubCredentials::new(id.clone(), secret.clone()))
            }
            _ => None,
        }
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Return pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let mut config = PoolConfig::new(self.database_url()?);
        if let Some(max) = self.db_max_connections {
            config = config.with_max_connections(max);
        }
        if let Some(secs) = self.db_connect_timeout_secs {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }
        Some(config)
    }
}
