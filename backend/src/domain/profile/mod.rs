//! Developer profile aggregate.
//!
//! One profile exists per user. Create-or-update calls merge scalar fields
//! sparsely while `skills` and `social` are replaced whole; the embedded
//! experience and education lists are only touched through their own
//! operations.

mod entries;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{UserId, UserSummary};

pub use entries::{
    EducationDraft, EducationEntry, EntryId, EntryList, ExperienceDraft, ExperienceEntry,
    SectionEntry,
};

/// Social links shown on a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Split a comma-delimited skills string.
///
/// Pieces are trimmed and kept in order. Empty pieces and duplicates stay.
///
/// # Examples
/// ```
/// use profiles::domain::parse_skills;
///
/// assert_eq!(parse_skills("rust, sql ,  go"), vec!["rust", "sql", "go"]);
/// assert_eq!(parse_skills("a, ,b"), vec!["a", "", "b"]);
/// ```
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').map(|piece| piece.trim().to_owned()).collect()
}

/// Flat field set received by create-or-update.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

/// Update set derived from a [`ProfileInput`].
///
/// Scalars hold only the present values. `social` is always complete and
/// replaces the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

/// Treat an empty string as absent. Whitespace-only values are kept.
#[must_use]
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

impl From<ProfileInput> for ProfileUpdate {
    fn from(input: ProfileInput) -> Self {
        Self {
            company: present(input.company),
            website: present(input.website),
            location: present(input.location),
            bio: present(input.bio),
            status: present(input.status),
            githubusername: present(input.githubusername),
            skills: present(input.skills).map(|raw| parse_skills(&raw)),
            social: Social {
                youtube: present(input.youtube),
                facebook: present(input.facebook),
                twitter: present(input.twitter),
                instagram: present(input.instagram),
                linkedin: present(input.linkedin),
            },
        }
    }
}

/// Developer profile owned by a single user.
///
/// ## Invariants
/// - At most one profile exists per `user_id`.
/// - Entry ids are unique within each section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub(crate) user_id: UserId,
    pub(crate) company: Option<String>,
    pub(crate) website: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) status: Option<String>,
    pub(crate) githubusername: Option<String>,
    pub(crate) skills: Vec<String>,
    pub(crate) social: Social,
    pub(crate) experience: EntryList<ExperienceEntry>,
    pub(crate) education: EntryList<EducationEntry>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Profile {
    /// Build the first profile for a user from an update set.
    pub fn create(user_id: UserId, update: ProfileUpdate, now: DateTime<Utc>) -> Self {
        let mut profile = Self {
            user_id,
            company: None,
            website: None,
            location: None,
            bio: None,
            status: None,
            githubusername: None,
            skills: Vec::new(),
            social: Social::default(),
            experience: EntryList::default(),
            education: EntryList::default(),
            created_at: now,
            updated_at: now,
        };
        profile.apply(update, now);
        profile
    }

    /// Merge an update set into an existing profile.
    ///
    /// Present scalars overwrite, absent ones are left alone. `skills` is
    /// replaced when supplied and `social` is always replaced.
    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        let ProfileUpdate {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            social,
        } = update;

        merge(&mut self.company, company);
        merge(&mut self.website, website);
        merge(&mut self.location, location);
        merge(&mut self.bio, bio);
        merge(&mut self.status, status);
        merge(&mut self.githubusername, githubusername);
        if let Some(skills) = skills {
            self.skills = skills;
        }
        self.social = social;
        self.touch(now);
    }

    /// Record a modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Reassemble a profile from stored columns.
    #[expect(
        clippy::too_many_arguments,
        reason = "mirrors the persisted column set one to one"
    )]
    pub fn from_parts(
        user_id: UserId,
        scalars: ProfileScalars,
        skills: Vec<String>,
        social: Social,
        experience: Vec<ExperienceEntry>,
        education: Vec<EducationEntry>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let ProfileScalars {
            company,
            website,
            location,
            bio,
            status,
            githubusername,
        } = scalars;
        Self {
            user_id,
            company,
            website,
            location,
            bio,
            status,
            githubusername,
            skills,
            social,
            experience: experience.into(),
            education: education.into(),
            created_at,
            updated_at,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn githubusername(&self) -> Option<&str> {
        self.githubusername.as_deref()
    }

    pub fn skills(&self) -> &[String] {
        self.skills.as_slice()
    }

    pub fn social(&self) -> &Social {
        &self.social
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        self.experience.as_slice()
    }

    pub fn education(&self) -> &[EducationEntry] {
        self.education.as_slice()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Scalar columns, cloned for persistence.
    pub fn scalars(&self) -> ProfileScalars {
        ProfileScalars {
            company: self.company.clone(),
            website: self.website.clone(),
            location: self.location.clone(),
            bio: self.bio.clone(),
            status: self.status.clone(),
            githubusername: self.githubusername.clone(),
        }
    }
}

fn merge(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Optional scalar columns of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileScalars {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
}

/// Profile together with its owner's public fields.
///
/// `owner` is `None` when the owning user record no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedProfile {
    pub profile: Profile,
    pub owner: Option<UserSummary>,
}
