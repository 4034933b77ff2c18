//! Repository listing proxy handler.
//!
//! ```text
//! GET /api/profile/github/{username}
//! ```

use actix_web::{get, web};

use crate::domain::ports::CodeRepository;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List the newest public repositories of a GitHub user.
///
/// Any upstream failure is reported as 404 without upstream details.
#[utoipa::path(
    get,
    path = "/api/profile/github/{username}",
    params(("username" = String, Path, description = "GitHub login")),
    responses(
        (status = 200, description = "Up to five repositories, newest first", body = [CodeRepository]),
        (status = 404, description = "No Github profile found", body = ErrorSchema)
    ),
    tags = ["github"],
    operation_id = "listGithubRepositories",
    security([])
)]
#[get("/github/{username}")]
pub async fn list_github_repositories(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<CodeRepository>>> {
    let repositories = state.repositories.recent_repositories(&path).await?;
    Ok(web::Json(repositories))
}
