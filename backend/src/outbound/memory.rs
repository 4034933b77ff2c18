//! In-process profile and user stores.
//!
//! Used when no database URL is configured and by the lifecycle tests. Each
//! store guards a `HashMap` with a mutex, so every call observes and writes a
//! whole document.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ProfileRepository, ProfileRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Profile, User, UserId};

fn poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}

/// Profile store keyed by owner.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Profile>>, ProfileRepositoryError> {
        self.profiles
            .lock()
            .map_err(|_| ProfileRepositoryError::query(poisoned("profile")))
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut profiles: Vec<Profile> = self.lock()?.values().cloned().collect();
        profiles.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.user_id().as_ref().cmp(b.user_id().as_ref()))
        });
        Ok(profiles)
    }

    async fn save(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut profiles = self.lock()?;
        let stored = match profiles.get(profile.user_id()) {
            // Keep the original creation time, as the SQL upsert does.
            Some(existing) if existing.created_at() != profile.created_at() => {
                let mut merged = profile.clone();
                merged.created_at = existing.created_at();
                merged
            }
            _ => profile.clone(),
        };
        profiles.insert(profile.user_id().clone(), stored);
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<bool, ProfileRepositoryError> {
        Ok(self.lock()?.remove(user_id).is_some())
    }
}

/// User store keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::query(poisoned("user")))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.lock()?.insert(user.id().clone(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.remove(id).is_some())
    }
}
