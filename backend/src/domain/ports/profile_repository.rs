//! Port for profile persistence.
//!
//! A profile is stored as one document keyed by its owner. `save` replaces
//! the whole document in a single write, so readers never observe a partial
//! update.

use async_trait::async_trait;

use crate::domain::{Profile, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
    }
}

/// Keyed profile storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile owned by `user_id`, if any.
    async fn find_by_user(&self, user_id: &UserId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Fetch every stored profile, oldest first.
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Insert the profile or replace the one already stored for its owner.
    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Remove the profile owned by `user_id`.
    ///
    /// Returns whether a profile was removed; a missing profile is not an
    /// error.
    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileRepositoryError>;
}

/// Fixture repository that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn find_by_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _profile: &Profile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }

    async fn delete_by_user(&self, _user_id: &UserId) -> Result<bool, ProfileRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_repository_finds_nothing() {
        let repo = FixtureProfileRepository;
        let found = repo
            .find_by_user(&UserId::random())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
        assert!(repo.list_all().await.expect("fixture list").is_empty());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = ProfileRepositoryError::connection("pool exhausted");
        assert_eq!(
            err.to_string(),
            "profile repository connection failed: pool exhausted"
        );
    }
}
