//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    IdentityProvider, ProfileCommand, ProfileQuery, RepositoryListingQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub repositories: Arc<dyn RepositoryListingQuery>,
    pub identity: Arc<dyn IdentityProvider>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileCommand>,
    pub profiles_query: Arc<dyn ProfileQuery>,
    pub repositories: Arc<dyn RepositoryListingQuery>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use profiles::domain::ports::{
    ///     FixtureIdentityProvider, FixtureProfileRepository, FixtureRepositoryListingSource,
    ///     FixtureUserRepository,
    /// };
    /// use profiles::domain::{ProfileService, RepositoryListingService};
    /// use profiles::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let service = Arc::new(ProfileService::new(
    ///     Arc::new(FixtureProfileRepository),
    ///     Arc::new(FixtureUserRepository),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     profiles: service.clone(),
    ///     profiles_query: service,
    ///     repositories: Arc::new(RepositoryListingService::new(Arc::new(
    ///         FixtureRepositoryListingSource,
    ///     ))),
    ///     identity: Arc::new(FixtureIdentityProvider),
    /// });
    /// let _identity = state.identity.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            profiles,
            profiles_query,
            repositories,
            identity,
        } = ports;
        Self {
            profiles,
            profiles_query,
            repositories,
            identity,
        }
    }
}
