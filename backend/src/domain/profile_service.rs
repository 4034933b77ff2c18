//! Profile domain service.
//!
//! Implements the profile driving ports on top of the profile and user
//! repositories. Sub-list operations load the stored document, mutate it
//! through [`SectionEntry`] and save it back whole; concurrent writers are
//! last-write-wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    EducationDraft, EducationEntry, EntryId, Error, ExperienceDraft, ExperienceEntry,
    OwnedProfile, Profile, ProfileInput, ProfileUpdate, SectionEntry, UserId,
};

/// Message returned when the caller has no profile yet.
pub const NO_PROFILE_MESSAGE: &str = "There is no profile for this user";
/// Message returned when a looked-up profile does not exist.
pub const PROFILE_NOT_FOUND_MESSAGE: &str = "Profile not found";

/// Build the client error used for absent profiles.
pub fn profile_not_found(message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": "profile_not_found" }))
}

/// Profile service implementing [`ProfileCommand`] and [`ProfileQuery`].
#[derive(Clone)]
pub struct ProfileService<P, U> {
    profiles: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ProfileService<P, U> {
    /// Create a new service with the given repositories.
    pub fn new(profiles: Arc<P>, users: Arc<U>) -> Self {
        Self { profiles, users }
    }
}

impl<P, U> ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    fn map_profile_error(error: ProfileRepositoryError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_user_error(error: UserPersistenceError) -> Error {
        Error::internal(error.to_string())
    }

    async fn load(&self, user_id: &UserId) -> Result<Option<Profile>, Error> {
        self.profiles
            .find_by_user(user_id)
            .await
            .map_err(Self::map_profile_error)
    }

    async fn load_existing(&self, user_id: &UserId) -> Result<Profile, Error> {
        self.load(user_id)
            .await?
            .ok_or_else(|| profile_not_found(NO_PROFILE_MESSAGE))
    }

    async fn store(&self, profile: &Profile) -> Result<(), Error> {
        self.profiles
            .save(profile)
            .await
            .map_err(Self::map_profile_error)
    }

    async fn with_owner(&self, profile: Profile) -> Result<OwnedProfile, Error> {
        let owner = self
            .users
            .find_by_id(profile.user_id())
            .await
            .map_err(Self::map_user_error)?
            .map(|user| user.summary());
        Ok(OwnedProfile { profile, owner })
    }

    async fn add_entry<E>(&self, user_id: &UserId, draft: E::Draft) -> Result<OwnedProfile, Error>
    where
        E: SectionEntry,
    {
        let mut profile = self.load_existing(user_id).await?;
        let entry_id = E::section_mut(&mut profile).prepend(draft);
        profile.touch(Utc::now());
        self.store(&profile).await?;
        debug!(section = E::SECTION, %entry_id, user_id = %user_id, "entry added");
        self.with_owner(profile).await
    }

    async fn update_entry<E>(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
        draft: E::Draft,
    ) -> Result<OwnedProfile, Error>
    where
        E: SectionEntry,
        E::Draft: Clone,
    {
        let mut profile = self.load_existing(user_id).await?;
        let changed = match entry_id {
            Some(id) => E::section_mut(&mut profile).replace_matching(id, draft),
            None => 0,
        };
        if changed > 0 {
            profile.touch(Utc::now());
        }
        self.store(&profile).await?;
        debug!(section = E::SECTION, changed, user_id = %user_id, "entry update applied");
        self.with_owner(profile).await
    }

    async fn remove_entry<E>(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<OwnedProfile, Error>
    where
        E: SectionEntry,
    {
        let mut profile = self.load_existing(user_id).await?;
        let removed = match entry_id {
            Some(id) => E::section_mut(&mut profile).remove_matching(id),
            None => 0,
        };
        if removed > 0 {
            profile.touch(Utc::now());
        }
        self.store(&profile).await?;
        debug!(
            section = E::SECTION,
            removed,
            remaining = E::section(&profile).len(),
            user_id = %user_id,
            "entry removal applied"
        );
        self.with_owner(profile).await
    }
}

#[async_trait]
impl<P, U> ProfileCommand for ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    async fn upsert(&self, user_id: &UserId, input: ProfileInput) -> Result<OwnedProfile, Error> {
        let update = ProfileUpdate::from(input);
        let now = Utc::now();
        let profile = match self.load(user_id).await? {
            Some(mut existing) => {
                existing.apply(update, now);
                existing
            }
            None => Profile::create(user_id.clone(), update, now),
        };
        self.store(&profile).await?;
        self.with_owner(profile).await
    }

    async fn add_experience(
        &self,
        user_id: &UserId,
        draft: ExperienceDraft,
    ) -> Result<OwnedProfile, Error> {
        self.add_entry::<ExperienceEntry>(user_id, draft).await
    }

    async fn update_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
        draft: ExperienceDraft,
    ) -> Result<OwnedProfile, Error> {
        self.update_entry::<ExperienceEntry>(user_id, entry_id, draft)
            .await
    }

    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<OwnedProfile, Error> {
        self.remove_entry::<ExperienceEntry>(user_id, entry_id).await
    }

    async fn add_education(
        &self,
        user_id: &UserId,
        draft: EducationDraft,
    ) -> Result<OwnedProfile, Error> {
        self.add_entry::<EducationEntry>(user_id, draft).await
    }

    async fn update_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
        draft: EducationDraft,
    ) -> Result<OwnedProfile, Error> {
        self.update_entry::<EducationEntry>(user_id, entry_id, draft)
            .await
    }

    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<OwnedProfile, Error> {
        self.remove_entry::<EducationEntry>(user_id, entry_id).await
    }

    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error> {
        let profile_removed = self
            .profiles
            .delete_by_user(user_id)
            .await
            .map_err(Self::map_profile_error)?;
        let user_removed = self
            .users
            .delete(user_id)
            .await
            .map_err(Self::map_user_error)?;
        debug!(user_id = %user_id, profile_removed, user_removed, "account deleted");
        Ok(())
    }
}

#[async_trait]
impl<P, U> ProfileQuery for ProfileService<P, U>
where
    P: ProfileRepository,
    U: UserRepository,
{
    async fn own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, Error> {
        let profile = self.load_existing(user_id).await?;
        self.with_owner(profile).await
    }

    async fn profile_for_user(&self, raw_user_id: &str) -> Result<OwnedProfile, Error> {
        let Ok(user_id) = UserId::new(raw_user_id) else {
            return Err(profile_not_found(PROFILE_NOT_FOUND_MESSAGE));
        };
        let profile = self
            .load(&user_id)
            .await?
            .ok_or_else(|| profile_not_found(PROFILE_NOT_FOUND_MESSAGE))?;
        self.with_owner(profile).await
    }

    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, Error> {
        let profiles = self
            .profiles
            .list_all()
            .await
            .map_err(Self::map_profile_error)?;
        let ids: Vec<UserId> = profiles.iter().map(|p| p.user_id().clone()).collect();
        let mut owners: HashMap<UserId, _> = self
            .users
            .find_by_ids(&ids)
            .await
            .map_err(Self::map_user_error)?
            .into_iter()
            .map(|user| (user.id().clone(), user.summary()))
            .collect();

        Ok(profiles
            .into_iter()
            .map(|profile| {
                let owner = owners.remove(profile.user_id());
                OwnedProfile { profile, owner }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
