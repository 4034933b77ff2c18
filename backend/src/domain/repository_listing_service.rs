//! Repository listing service.
//!
//! Every upstream failure is reported to clients as the same not-found error;
//! the cause only reaches the logs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::Error;
use crate::domain::ports::{
    CodeRepository, GithubUsername, RepositoryListingQuery, RepositoryListingSource,
};

/// Message returned for any repository listing failure.
pub const NO_GITHUB_PROFILE_MESSAGE: &str = "No Github profile found";

/// Service implementing [`RepositoryListingQuery`].
#[derive(Clone)]
pub struct RepositoryListingService<S> {
    source: Arc<S>,
}

impl<S> RepositoryListingService<S> {
    /// Create a new service over the given source.
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S> RepositoryListingQuery for RepositoryListingService<S>
where
    S: RepositoryListingSource,
{
    async fn recent_repositories(&self, raw_username: &str) -> Result<Vec<CodeRepository>, Error> {
        let username = GithubUsername::new(raw_username).map_err(|error| {
            warn!(%error, username = raw_username, "rejected repository listing username");
            Error::not_found(NO_GITHUB_PROFILE_MESSAGE)
        })?;

        self.source.list_recent(&username).await.map_err(|error| {
            warn!(%error, username = %username, "repository listing failed");
            Error::not_found(NO_GITHUB_PROFILE_MESSAGE)
        })
    }
}
