//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod profile_command;
mod profile_query;
mod profile_repository;
mod repository_listing;
mod user_repository;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{FixtureIdentityProvider, IdentityProvider};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::ProfileCommand;
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{
    FixtureProfileRepository, ProfileRepository, ProfileRepositoryError,
};
#[cfg(test)]
pub use repository_listing::{MockRepositoryListingQuery, MockRepositoryListingSource};
pub use repository_listing::{
    CodeRepository, FixtureRepositoryListingSource, GITHUB_USERNAME_MAX, GithubUsername,
    GithubUsernameError, RepositoryListingError, RepositoryListingQuery,
    RepositoryListingSource,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
