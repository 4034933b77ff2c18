//! Experience and education entry handlers.
//!
//! Each section supports `PUT /{section}` to prepend an entry,
//! `PUT /{section}/{entry_id}` to overwrite matching entries and
//! `DELETE /{section}/{entry_id}` to remove them. Ids that cannot name an
//! entry leave the list untouched.

use actix_web::{delete, put, web};

use crate::domain::{EducationDraft, EntryId, ExperienceDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::profiles_dto::{EducationRequest, ExperienceRequest, ProfileResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Add a work experience entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/experience",
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "addExperience"
)]
#[put("/experience")]
pub async fn add_experience(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<ExperienceRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let draft = ExperienceDraft::try_from(payload.into_inner())?;
    let owned = state.profiles.add_experience(caller.user_id(), draft).await?;
    Ok(web::Json(owned.into()))
}

/// Overwrite the caller's experience entries with a matching id.
#[utoipa::path(
    put,
    path = "/api/profile/experience/{exp_id}",
    params(("exp_id" = String, Path, description = "Experience entry id")),
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "updateExperience"
)]
#[put("/experience/{exp_id}")]
pub async fn update_experience(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ExperienceRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let draft = ExperienceDraft::try_from(payload.into_inner())?;
    let owned = state
        .profiles
        .update_experience(caller.user_id(), EntryId::parse(&path), draft)
        .await?;
    Ok(web::Json(owned.into()))
}

/// Remove the caller's experience entries with a matching id.
#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    params(("exp_id" = String, Path, description = "Experience entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No profile for this user", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "removeExperience"
)]
#[delete("/experience/{exp_id}")]
pub async fn remove_experience(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owned = state
        .profiles
        .remove_experience(caller.user_id(), EntryId::parse(&path))
        .await?;
    Ok(web::Json(owned.into()))
}

/// Add an education entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/education",
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "addEducation"
)]
#[put("/education")]
pub async fn add_education(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<EducationRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let draft = EducationDraft::try_from(payload.into_inner())?;
    let owned = state.profiles.add_education(caller.user_id(), draft).await?;
    Ok(web::Json(owned.into()))
}

/// Overwrite the caller's education entries with a matching id.
#[utoipa::path(
    put,
    path = "/api/profile/education/{edu_id}",
    params(("edu_id" = String, Path, description = "Education entry id")),
    request_body = EducationRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Validation failed or no profile", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "updateEducation"
)]
#[put("/education/{edu_id}")]
pub async fn update_education(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<EducationRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let draft = EducationDraft::try_from(payload.into_inner())?;
    let owned = state
        .profiles
        .update_education(caller.user_id(), EntryId::parse(&path), draft)
        .await?;
    Ok(web::Json(owned.into()))
}

/// Remove the caller's education entries with a matching id.
#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    params(("edu_id" = String, Path, description = "Education entry id")),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No profile for this user", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "removeEducation"
)]
#[delete("/education/{edu_id}")]
pub async fn remove_education(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owned = state
        .profiles
        .remove_education(caller.user_id(), EntryId::parse(&path))
        .await?;
    Ok(web::Json(owned.into()))
}
