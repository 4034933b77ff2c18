//! Driving port for profile mutations.
//!
//! Inbound adapters validate request payloads, resolve the caller and then
//! call this port. Every operation returns the stored profile with its owner
//! joined in.

use async_trait::async_trait;

use crate::domain::{
    EducationDraft, EntryId, Error, ExperienceDraft, OwnedProfile, ProfileInput, UserId,
};

/// Use-case port for changing a caller's own profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create the caller's profile or merge the input into the existing one.
    async fn upsert(&self, user_id: &UserId, input: ProfileInput) -> Result<OwnedProfile, Error>;

    /// Prepend a work experience entry.
    async fn add_experience(
        &self,
        user_id: &UserId,
        draft: ExperienceDraft,
    ) -> Result<OwnedProfile, Error>;

    /// Overwrite the experience entries matching `entry_id`.
    ///
    /// `None` names no entry; the profile is returned unchanged.
    async fn update_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
        draft: ExperienceDraft,
    ) -> Result<OwnedProfile, Error>;

    /// Remove the experience entries matching `entry_id`.
    async fn remove_experience(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<OwnedProfile, Error>;

    /// Prepend an education entry.
    async fn add_education(
        &self,
        user_id: &UserId,
        draft: EducationDraft,
    ) -> Result<OwnedProfile, Error>;

    /// Overwrite the education entries matching `entry_id`.
    async fn update_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
        draft: EducationDraft,
    ) -> Result<OwnedProfile, Error>;

    /// Remove the education entries matching `entry_id`.
    async fn remove_education(
        &self,
        user_id: &UserId,
        entry_id: Option<EntryId>,
    ) -> Result<OwnedProfile, Error>;

    /// Delete the caller's profile and user record.
    async fn delete_account(&self, user_id: &UserId) -> Result<(), Error>;
}
