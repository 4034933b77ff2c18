//! Profile DTOs and request validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    EducationDraft, EducationEntry, Error, ExperienceDraft, ExperienceEntry, OwnedProfile,
    ProfileInput, Social, UserSummary, present,
};
use crate::inbound::http::validation::{FieldErrors, FieldName};

const STATUS: FieldName = FieldName::new("status");
const SKILLS: FieldName = FieldName::new("skills");
const TITLE: FieldName = FieldName::new("title");
const COMPANY: FieldName = FieldName::new("company");
const SCHOOL: FieldName = FieldName::new("school");
const DEGREE: FieldName = FieldName::new("degree");
const FROM: FieldName = FieldName::new("from");
const TO: FieldName = FieldName::new("to");

/// Request payload for `POST /api/profile`.
///
/// `skills` is one comma-separated string. Blank values count as absent.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ProfileRequest {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[schema(example = "Developer")]
    pub status: Option<String>,
    pub githubusername: Option<String>,
    #[schema(example = "rust, sql, actix")]
    pub skills: Option<String>,
    pub youtube: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
}

impl TryFrom<ProfileRequest> for ProfileInput {
    type Error = Error;

    fn try_from(request: ProfileRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let status = errors.require(request.status, STATUS, "Status is required");
        let skills = errors.require(request.skills, SKILLS, "Skills is required");
        errors.finish()?;

        Ok(Self {
            company: request.company,
            website: request.website,
            location: request.location,
            bio: request.bio,
            status,
            githubusername: request.githubusername,
            skills,
            youtube: request.youtube,
            facebook: request.facebook,
            twitter: request.twitter,
            instagram: request.instagram,
            linkedin: request.linkedin,
        })
    }
}

/// Request payload for adding or editing a work experience entry.
///
/// Dates accept `YYYY-MM-DD` or RFC 3339 timestamps.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ExperienceRequest {
    #[schema(example = "Backend engineer")]
    pub title: Option<String>,
    #[schema(example = "Analytical Engines Ltd")]
    pub company: Option<String>,
    pub location: Option<String>,
    #[schema(example = "2021-03-01")]
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<ExperienceRequest> for ExperienceDraft {
    type Error = Error;

    fn try_from(request: ExperienceRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let title = errors.require(request.title, TITLE, "Title is required");
        let company = errors.require(request.company, COMPANY, "Company is required");
        let from = errors.require_date(request.from, FROM, "From date is required");
        let to = errors.optional_date(request.to, TO);
        errors.finish()?;

        match (title, company, from) {
            (Some(title), Some(company), Some(from)) => Ok(Self {
                title,
                company,
                location: present(request.location),
                from,
                to,
                current: request.current.unwrap_or(false),
                description: present(request.description),
            }),
            _ => Err(Error::internal("experience validation lost a required field")),
        }
    }
}

/// Request payload for adding or editing an education entry.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EducationRequest {
    #[schema(example = "University of London")]
    pub school: Option<String>,
    #[schema(example = "BSc Mathematics")]
    pub degree: Option<String>,
    #[schema(example = "2012-09-01")]
    pub from: Option<String>,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<EducationRequest> for EducationDraft {
    type Error = Error;

    fn try_from(request: EducationRequest) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::new();
        let school = errors.require(request.school, SCHOOL, "School is required");
        let degree = errors.require(request.degree, DEGREE, "Degree is required");
        let from = errors.require_date(request.from, FROM, "From date is required");
        let to = errors.optional_date(request.to, TO);
        errors.finish()?;

        match (school, degree, from) {
            (Some(school), Some(degree), Some(from)) => Ok(Self {
                school,
                degree,
                from,
                to,
                current: request.current.unwrap_or(false),
                description: present(request.description),
            }),
            _ => Err(Error::internal("education validation lost a required field")),
        }
    }
}

/// Response payload for a profile with its owner joined in.
///
/// `user` is `null` when the owner record no longer exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    pub user: Option<UserSummary>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: Option<String>,
    pub githubusername: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OwnedProfile> for ProfileResponse {
    fn from(owned: OwnedProfile) -> Self {
        let OwnedProfile { profile, owner } = owned;
        Self {
            user_id: profile.user_id().to_string(),
            user: owner,
            company: profile.company().map(str::to_owned),
            website: profile.website().map(str::to_owned),
            location: profile.location().map(str::to_owned),
            bio: profile.bio().map(str::to_owned),
            status: profile.status().map(str::to_owned),
            githubusername: profile.githubusername().map(str::to_owned),
            skills: profile.skills().to_vec(),
            social: profile.social().clone(),
            experience: profile.experience().to_vec(),
            education: profile.education().to_vec(),
            created_at: profile.created_at().to_rfc3339(),
            updated_at: profile.updated_at().to_rfc3339(),
        }
    }
}

/// Plain acknowledgement body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "User deleted")]
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Profile, ProfileUpdate, UserId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;
    use serde_json::Value;

    fn error_fields(err: &Error) -> Vec<(String, String)> {
        err.details()
            .and_then(|details| details.get("errors"))
            .and_then(Value::as_array)
            .expect("errors list")
            .iter()
            .map(|item| {
                (
                    item["field"].as_str().unwrap_or_default().to_owned(),
                    item["message"].as_str().unwrap_or_default().to_owned(),
                )
            })
            .collect()
    }

    #[rstest]
    fn profile_requires_status_and_skills() {
        let err = ProfileInput::try_from(ProfileRequest::default()).expect_err("missing fields");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error_fields(&err),
            vec![
                ("status".to_owned(), "Status is required".to_owned()),
                ("skills".to_owned(), "Skills is required".to_owned()),
            ]
        );
    }

    #[rstest]
    fn whitespace_only_required_fields_are_accepted() {
        let input = ProfileInput::try_from(ProfileRequest {
            status: Some("  ".into()),
            skills: Some(" ".into()),
            ..ProfileRequest::default()
        })
        .expect("whitespace is not empty");
        assert_eq!(input.status.as_deref(), Some("  "));
    }

    #[rstest]
    fn profile_request_passes_fields_through() {
        let input = ProfileInput::try_from(ProfileRequest {
            status: Some("Developer".into()),
            skills: Some("rust, go".into()),
            twitter: Some("https://twitter.com/ada".into()),
            ..ProfileRequest::default()
        })
        .expect("valid request");
        assert_eq!(input.status.as_deref(), Some("Developer"));
        assert_eq!(input.skills.as_deref(), Some("rust, go"));
        assert_eq!(input.twitter.as_deref(), Some("https://twitter.com/ada"));
    }

    #[rstest]
    fn experience_lists_every_missing_field() {
        let err = ExperienceDraft::try_from(ExperienceRequest::default()).expect_err("empty");
        assert_eq!(
            error_fields(&err),
            vec![
                ("title".to_owned(), "Title is required".to_owned()),
                ("company".to_owned(), "Company is required".to_owned()),
                ("from".to_owned(), "From date is required".to_owned()),
            ]
        );
    }

    #[rstest]
    fn education_lists_every_missing_field() {
        let err = EducationDraft::try_from(EducationRequest {
            from: Some("2012-09-01".into()),
            ..EducationRequest::default()
        })
        .expect_err("missing school and degree");
        assert_eq!(
            error_fields(&err),
            vec![
                ("school".to_owned(), "School is required".to_owned()),
                ("degree".to_owned(), "Degree is required".to_owned()),
            ]
        );
    }

    #[rstest]
    fn experience_draft_normalises_optionals() {
        let draft = ExperienceDraft::try_from(ExperienceRequest {
            title: Some("Engineer".into()),
            company: Some("Acme".into()),
            location: Some(String::new()),
            from: Some("2020-01-15T09:00:00Z".into()),
            to: Some(String::new()),
            current: None,
            description: Some("Built things".into()),
        })
        .expect("valid draft");
        assert_eq!(draft.from, NaiveDate::from_ymd_opt(2020, 1, 15).expect("date"));
        assert_eq!(draft.location, None);
        assert_eq!(draft.to, None);
        assert!(!draft.current);
        assert_eq!(draft.description.as_deref(), Some("Built things"));
    }

    #[rstest]
    fn invalid_to_date_is_reported() {
        let err = EducationDraft::try_from(EducationRequest {
            school: Some("UCL".into()),
            degree: Some("BSc".into()),
            from: Some("2012-09-01".into()),
            to: Some("later".into()),
            ..EducationRequest::default()
        })
        .expect_err("bad date");
        let list = err
            .details()
            .and_then(|details| details.get("errors"))
            .and_then(Value::as_array)
            .expect("errors list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["field"], "to");
        assert_eq!(list[0]["code"], "invalid_date");
    }

    #[rstest]
    fn response_uses_camel_case_and_null_owner() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("time");
        let profile = Profile::create(UserId::random(), ProfileUpdate::default(), created);
        let value = serde_json::to_value(ProfileResponse::from(OwnedProfile {
            profile,
            owner: None,
        }))
        .expect("serialise");
        assert_eq!(value["user"], Value::Null);
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00+00:00");
        assert!(value.get("userId").is_some());
        assert!(value.get("created_at").is_none());
    }
}
