//! Driven port resolving caller credentials into user identities.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, UserId};

/// Resolves an opaque bearer credential into the caller's user id.
///
/// Implementations return [`Error::unauthorized`] for credentials they do
/// not accept.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the credential.
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error>;
}

/// Fixture provider accepting any token that is itself a user id.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityProvider;

#[async_trait]
impl IdentityProvider for FixtureIdentityProvider {
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        UserId::new(token.expose()).map_err(|_| Error::unauthorized("token is not valid"))
    }
}
