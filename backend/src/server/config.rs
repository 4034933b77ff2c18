//! HTTP server configuration object and helpers.

use std::path::PathBuf;
use std::sync::Arc;

use profiles::domain::ports::{IdentityProvider, RepositoryListingQuery};
use profiles::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) identity: Arc<dyn IdentityProvider>,
    pub(crate) repositories: Arc<dyn RepositoryListingQuery>,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_users_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Construct a server configuration from its required adapters.
    #[must_use]
    pub fn new(
        bind_addr: impl Into<String>,
        identity: Arc<dyn IdentityProvider>,
        repositories: Arc<dyn RepositoryListingQuery>,
    ) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            identity,
            repositories,
            db_pool: None,
            seed_users_file: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, profiles and owners are stored in PostgreSQL;
    /// otherwise the in-memory store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: Option<DbPool>) -> Self {
        self.db_pool = pool;
        self
    }

    /// Load owner records from a JSON file before serving.
    #[must_use]
    pub fn with_seed_users_file(mut self, path: Option<PathBuf>) -> Self {
        self.seed_users_file = path;
        self
    }
}
