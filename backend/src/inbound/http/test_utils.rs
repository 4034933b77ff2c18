//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{
    FixtureIdentityProvider, FixtureProfileRepository, FixtureRepositoryListingSource,
    FixtureUserRepository, IdentityProvider, ProfileCommand, ProfileQuery,
    RepositoryListingQuery,
};
use crate::domain::{ProfileService, RepositoryListingService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Builder for handler test state.
///
/// Unset ports fall back to fixtures. The fixture identity provider accepts
/// any bearer token that is itself a user id.
pub struct HttpStateBuilder {
    profiles: Option<Arc<dyn ProfileCommand>>,
    profiles_query: Option<Arc<dyn ProfileQuery>>,
    repositories: Option<Arc<dyn RepositoryListingQuery>>,
    identity: Option<Arc<dyn IdentityProvider>>,
}

/// Start building handler test state.
pub fn http_state() -> HttpStateBuilder {
    HttpStateBuilder {
        profiles: None,
        profiles_query: None,
        repositories: None,
        identity: None,
    }
}

impl HttpStateBuilder {
    pub fn with_command(mut self, command: impl ProfileCommand + 'static) -> Self {
        self.profiles = Some(Arc::new(command));
        self
    }

    pub fn with_query(mut self, query: impl ProfileQuery + 'static) -> Self {
        self.profiles_query = Some(Arc::new(query));
        self
    }

    pub fn with_repositories(mut self, query: impl RepositoryListingQuery + 'static) -> Self {
        self.repositories = Some(Arc::new(query));
        self
    }

    pub fn with_identity(mut self, identity: impl IdentityProvider + 'static) -> Self {
        self.identity = Some(Arc::new(identity));
        self
    }

    pub fn build(self) -> web::Data<HttpState> {
        let fixture = Arc::new(ProfileService::new(
            Arc::new(FixtureProfileRepository),
            Arc::new(FixtureUserRepository),
        ));
        let ports = HttpStatePorts {
            profiles: self.profiles.unwrap_or_else(|| fixture.clone()),
            profiles_query: self.profiles_query.unwrap_or(fixture),
            repositories: self.repositories.unwrap_or_else(|| {
                Arc::new(RepositoryListingService::new(Arc::new(
                    FixtureRepositoryListingSource,
                )))
            }),
            identity: self
                .identity
                .unwrap_or_else(|| Arc::new(FixtureIdentityProvider)),
        };
        web::Data::new(HttpState::new(ports))
    }
}
