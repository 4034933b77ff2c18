//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod entries;
pub mod error;
pub mod github;
pub mod health;
pub mod profiles;
pub mod profiles_dto;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Mount every profile route under `/api/profile`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use profiles::inbound::http::configure_profile_routes;
///
/// let _app = App::new().configure(configure_profile_routes);
/// ```
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/profile")
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| error::extraction_error(err).into()),
            )
            .service(profiles::get_own_profile)
            .service(profiles::list_profiles)
            .service(profiles::upsert_profile)
            .service(profiles::get_profile_by_user)
            .service(profiles::delete_account)
            .service(entries::add_experience)
            .service(entries::update_experience)
            .service(entries::remove_experience)
            .service(entries::add_education)
            .service(entries::update_education)
            .service(entries::remove_education)
            .service(github::list_github_repositories),
    );
}
