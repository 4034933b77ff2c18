//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every profile, entry, GitHub proxy and health endpoint
//! - **Schemas**: request and response DTOs plus the [`ErrorSchema`] wrapper
//!   that documents domain errors without coupling them to utoipa
//! - **Security**: bearer token authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use crate::domain::ports::CodeRepository;
use crate::domain::{EducationEntry, ExperienceEntry, Social, UserSummary};
use crate::inbound::http::profiles_dto::{
    EducationRequest, ExperienceRequest, MessageResponse, ProfileRequest, ProfileResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by authenticated paths.
pub const BEARER_SCHEME: &str = "BearerToken";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some(
                        "Signed access token. `x-auth-token` is accepted as a fallback header.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Developer profiles API",
        description = "Developer profiles with experience and education history, \
                       plus a GitHub repository listing proxy."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::profiles::get_own_profile,
        crate::inbound::http::profiles::upsert_profile,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::get_profile_by_user,
        crate::inbound::http::profiles::delete_account,
        crate::inbound::http::entries::add_experience,
        crate::inbound::http::entries::update_experience,
        crate::inbound::http::entries::remove_experience,
        crate::inbound::http::entries::add_education,
        crate::inbound::http::entries::update_education,
        crate::inbound::http::entries::remove_education,
        crate::inbound::http::github::list_github_repositories,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ProfileRequest,
        ProfileResponse,
        ExperienceRequest,
        EducationRequest,
        MessageResponse,
        ExperienceEntry,
        EducationEntry,
        Social,
        UserSummary,
        CodeRepository
    )),
    tags(
        (name = "profiles", description = "Profile lifecycle and lookup"),
        (name = "entries", description = "Experience and education history"),
        (name = "github", description = "Public GitHub repository listing"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI paths, schemas and security wiring.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_profile_response_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let profile = schemas.get("ProfileResponse").expect("ProfileResponse schema");

        assert_object_schema_has_field(profile, "userId");
        assert_object_schema_has_field(profile, "githubusername");
        assert_object_schema_has_field(profile, "experience");
    }

    #[rstest]
    #[case("/api/profile")]
    #[case("/api/profile/me")]
    #[case("/api/profile/user/{user_id}")]
    #[case("/api/profile/experience")]
    #[case("/api/profile/experience/{exp_id}")]
    #[case("/api/profile/education")]
    #[case("/api/profile/education/{edu_id}")]
    #[case("/api/profile/github/{username}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "missing path {path}"
        );
    }

    #[test]
    fn openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
