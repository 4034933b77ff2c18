//! Driving port for profile reads.

use async_trait::async_trait;

use crate::domain::{Error, OwnedProfile, UserId};

/// Use-case port for loading profiles with their owners joined in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Load the caller's own profile.
    ///
    /// A missing profile is reported as an invalid request with
    /// `details.code = "profile_not_found"`.
    async fn own_profile(&self, user_id: &UserId) -> Result<OwnedProfile, Error>;

    /// Load the profile of the user named by a raw path segment.
    ///
    /// Malformed ids are reported exactly like unknown ones.
    async fn profile_for_user(&self, raw_user_id: &str) -> Result<OwnedProfile, Error>;

    /// Load every profile.
    async fn list_profiles(&self) -> Result<Vec<OwnedProfile>, Error>;
}
