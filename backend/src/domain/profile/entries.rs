//! Ordered, id-keyed sub-collections embedded in a profile.
//!
//! Experience and education share one list type; the per-section behaviour
//! lives in [`SectionEntry`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Profile;

/// Profile-local identifier for a sub-collection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "0b0f3c6e-8d9a-4f5e-9c41-1d2a5b7e6f80")]
pub struct EntryId(Uuid);

impl EntryId {
    /// Allocate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier taken from a request path.
    ///
    /// Only the lower-case hyphenated form that entry ids render as is
    /// accepted; anything else returns `None`.
    ///
    /// # Examples
    /// ```
    /// use profiles::domain::EntryId;
    ///
    /// assert!(EntryId::parse("0b0f3c6e-8d9a-4f5e-9c41-1d2a5b7e6f80").is_some());
    /// assert!(EntryId::parse("42").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let id = Uuid::try_parse(raw).ok()?;
        (id.hyphenated().to_string() == raw).then_some(Self(id))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Behaviour shared by entries stored in a profile section.
pub trait SectionEntry: Clone + Send + Sync + 'static {
    /// Caller-supplied fields used to create or overwrite an entry.
    type Draft: Send;

    /// Section name used in logs.
    const SECTION: &'static str;

    /// Entry identifier.
    fn id(&self) -> EntryId;

    /// Build a stored entry from a draft.
    fn from_draft(id: EntryId, draft: Self::Draft) -> Self;

    /// Replace every mutable field with the draft's values.
    fn overwrite(&mut self, draft: Self::Draft);

    /// Borrow the section list this entry type lives in.
    fn section(profile: &Profile) -> &EntryList<Self>;

    /// Mutably borrow the section list this entry type lives in.
    fn section_mut(profile: &mut Profile) -> &mut EntryList<Self>;
}

/// Ordered list of entries, newest insertion first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryList<T>(Vec<T>);

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> EntryList<T> {
    /// Entries in display order.
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: SectionEntry> EntryList<T> {
    /// Insert a new entry at the front and return its identifier.
    pub fn prepend(&mut self, draft: T::Draft) -> EntryId {
        let mut id = EntryId::random();
        while self.contains(id) {
            id = EntryId::random();
        }
        self.0.insert(0, T::from_draft(id, draft));
        id
    }

    /// Overwrite every entry whose id equals `id`, keeping its position.
    ///
    /// Returns the number of entries changed. Nothing is inserted when no
    /// entry matches.
    pub fn replace_matching(&mut self, id: EntryId, draft: T::Draft) -> usize
    where
        T::Draft: Clone,
    {
        let mut changed = 0;
        for entry in self.0.iter_mut().filter(|entry| entry.id() == id) {
            entry.overwrite(draft.clone());
            changed += 1;
        }
        changed
    }

    /// Drop every entry whose id equals `id` and return how many went.
    pub fn remove_matching(&mut self, id: EntryId) -> usize {
        let before = self.0.len();
        self.0.retain(|entry| entry.id() != id);
        before - self.0.len()
    }

    fn contains(&self, id: EntryId) -> bool {
        self.0.iter().any(|entry| entry.id() == id)
    }
}

impl<T> From<Vec<T>> for EntryList<T> {
    fn from(value: Vec<T>) -> Self {
        Self(value)
    }
}

/// Fields supplied when adding or editing a work experience entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceDraft {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Stored work experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    #[schema(example = "Backend engineer")]
    pub title: String,
    #[schema(example = "Analytical Engines Ltd")]
    pub company: String,
    pub location: Option<String>,
    #[schema(value_type = String, format = Date, example = "2021-03-01")]
    pub from: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl SectionEntry for ExperienceEntry {
    type Draft = ExperienceDraft;

    const SECTION: &'static str = "experience";

    fn id(&self) -> EntryId {
        self.id
    }

    fn from_draft(id: EntryId, draft: ExperienceDraft) -> Self {
        let ExperienceDraft {
            title,
            company,
            location,
            from,
            to,
            current,
            description,
        } = draft;
        Self {
            id,
            title,
            company,
            location,
            from,
            to,
            current,
            description,
        }
    }

    fn overwrite(&mut self, draft: ExperienceDraft) {
        *self = Self::from_draft(self.id, draft);
    }

    fn section(profile: &Profile) -> &EntryList<Self> {
        &profile.experience
    }

    fn section_mut(profile: &mut Profile) -> &mut EntryList<Self> {
        &mut profile.experience
    }
}

/// Fields supplied when adding or editing an education entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EducationDraft {
    pub school: String,
    pub degree: String,
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

/// Stored education entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: EntryId,
    #[schema(example = "University of London")]
    pub school: String,
    #[schema(example = "BSc Mathematics")]
    pub degree: String,
    #[schema(value_type = String, format = Date, example = "2012-09-01")]
    pub from: NaiveDate,
    #[schema(value_type = Option<String>, format = Date)]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: Option<String>,
}

impl SectionEntry for EducationEntry {
    type Draft = EducationDraft;

    const SECTION: &'static str = "education";

    fn id(&self) -> EntryId {
        self.id
    }

    fn from_draft(id: EntryId, draft: EducationDraft) -> Self {
        let EducationDraft {
            school,
            degree,
            from,
            to,
            current,
            description,
        } = draft;
        Self {
            id,
            school,
            degree,
            from,
            to,
            current,
            description,
        }
    }

    fn overwrite(&mut self, draft: EducationDraft) {
        *self = Self::from_draft(self.id, draft);
    }

    fn section(profile: &Profile) -> &EntryList<Self> {
        &profile.education
    }

    fn section_mut(profile: &mut Profile) -> &mut EntryList<Self> {
        &mut profile.education
    }
}
