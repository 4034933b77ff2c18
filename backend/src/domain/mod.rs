//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the profile aggregate and the use cases around it without
//! depending on transport or storage details. Adapters reach the domain
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Profile / OwnedProfile: the profile aggregate and its joined view.
//! - ProfileService / RepositoryListingService: driving port implementations.

pub mod auth;
pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod repository_listing_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{AccessToken, AccessTokenValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    EducationDraft, EducationEntry, EntryId, EntryList, ExperienceDraft, ExperienceEntry,
    OwnedProfile, Profile, ProfileInput, ProfileScalars, ProfileUpdate, SectionEntry, Social,
    parse_skills, present,
};
pub use self::profile_service::{
    NO_PROFILE_MESSAGE, PROFILE_NOT_FOUND_MESSAGE, ProfileService, profile_not_found,
};
pub use self::repository_listing_service::{NO_GITHUB_PROFILE_MESSAGE, RepositoryListingService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserSummary, UserValidationError};

