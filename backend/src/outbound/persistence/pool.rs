//! bb8 pool of `diesel-async` PostgreSQL connections shared by the profile
//! and user repositories.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connections kept open when `PROFILES_DB_MAX_CONNECTIONS` is unset.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Checkout timeout used when `PROFILES_DB_CONNECT_TIMEOUT_SECS` is unset.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const MIN_IDLE_CONNECTIONS: u32 = 1;

/// Failures raised while building the pool or checking out a connection.
///
/// Repositories fold both into their `Connection` port error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },
    /// The pool could not be created.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Build a [`PoolError::Checkout`].
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build a [`PoolError::Build`].
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

/// Pool sizing for the profile store.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_connections: u32,
    connect_timeout: Duration,
}

impl PoolConfig {
    /// Start from the default sizing for `database_url`.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Cap the number of open connections. Zero is raised to one.
    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Set how long a checkout may wait.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Connection string the pool dials.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    fn min_idle(&self) -> u32 {
        MIN_IDLE_CONNECTIONS.min(self.max_connections)
    }
}

/// Cloneable handle on the shared connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool and open the idle connections.
    ///
    /// # Errors
    /// [`PoolError::Build`] when the URL is rejected or the server is
    /// unreachable.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url());
        let inner = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_idle()))
            .connection_timeout(config.connect_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    /// [`PoolError::Checkout`] when none frees up within the timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "postgres://profiles@localhost/profiles";

    #[rstest]
    fn defaults_apply_until_overridden() {
        let config = PoolConfig::new(URL);
        assert_eq!(config.database_url(), URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);

        let tuned = config
            .with_max_connections(4)
            .with_connect_timeout(Duration::from_secs(5));
        assert_eq!(tuned.max_connections, 4);
        assert_eq!(tuned.connect_timeout, Duration::from_secs(5));
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(8, 1)]
    fn idle_connections_never_exceed_the_cap(#[case] max: u32, #[case] idle: u32) {
        let config = PoolConfig::new(URL).with_max_connections(max);
        assert!(config.max_connections >= 1);
        assert_eq!(config.min_idle(), idle);
    }

    #[rstest]
    fn pool_errors_map_to_repository_connection_errors() {
        use super::super::diesel_basic_error_mapping::map_basic_pool_error;
        use crate::domain::ports::ProfileRepositoryError;

        let err: ProfileRepositoryError = map_basic_pool_error(
            PoolError::checkout("timed out waiting for connection"),
            ProfileRepositoryError::connection,
        );
        assert_eq!(
            err,
            ProfileRepositoryError::connection("timed out waiting for connection")
        );
    }
}
