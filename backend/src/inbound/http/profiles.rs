//! Profile API handlers.
//!
//! ```text
//! GET    /api/profile/me
//! POST   /api/profile {"status":"Developer","skills":"rust, sql"}
//! GET    /api/profile
//! GET    /api/profile/user/{user_id}
//! DELETE /api/profile
//! ```

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ProfileInput;
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::profiles_dto::{MessageResponse, ProfileRequest, ProfileResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Acknowledgement returned after an account is deleted.
pub const ACCOUNT_DELETED_MESSAGE: &str = "User deleted";

/// Fetch the caller's own profile.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileResponse),
        (status = 400, description = "No profile for this user", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getOwnProfile"
)]
#[get("/me")]
pub async fn get_own_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owned = state.profiles_query.own_profile(caller.user_id()).await?;
    Ok(web::Json(owned.into()))
}

/// Create the caller's profile or merge the payload into it.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Stored profile", body = ProfileResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertProfile"
)]
#[post("")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let input = ProfileInput::try_from(payload.into_inner())?;
    let owned = state.profiles.upsert(caller.user_id(), input).await?;
    Ok(web::Json(owned.into()))
}

/// List every profile with its owner.
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "All profiles", body = [ProfileResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles",
    security([])
)]
#[get("")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    let profiles = state.profiles_query.list_profiles().await?;
    Ok(web::Json(
        profiles.into_iter().map(ProfileResponse::from).collect(),
    ))
}

/// Fetch a profile by its owner's id.
///
/// Malformed ids are reported like unknown ones.
#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 400, description = "Profile not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfileByUser",
    security([])
)]
#[get("/user/{user_id}")]
pub async fn get_profile_by_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let owned = state
        .profiles_query
        .profile_for_user(&path.into_inner())
        .await?;
    Ok(web::Json(owned.into()))
}

/// Delete the caller's profile and user record.
#[utoipa::path(
    delete,
    path = "/api/profile",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "deleteAccount"
)]
#[delete("")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    state.profiles.delete_account(caller.user_id()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: ACCOUNT_DELETED_MESSAGE.to_owned(),
    }))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
