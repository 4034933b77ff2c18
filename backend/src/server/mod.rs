//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{App, HttpServer, web};

use profiles::Trace;
#[cfg(debug_assertions)]
use profiles::doc::ApiDoc;
use profiles::inbound::http::configure_profile_routes;
use profiles::inbound::http::health::{HealthState, live, ready};
use profiles::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(NormalizePath::new(TrailingSlash::Trim))
        .wrap(Trace)
        .configure(configure_profile_routes)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address and adapters.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding owners, binding the socket, or
/// starting the server fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config).await?;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr.as_str())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring tests for the assembled application.

    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use profiles::domain::RepositoryListingService;
    use profiles::domain::TRACE_ID_HEADER;
    use profiles::domain::ports::{FixtureIdentityProvider, FixtureRepositoryListingSource};
    use rstest::rstest;
    use serde_json::{Value, json};

    const CALLER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn deps() -> AppDependencies {
        let config = ServerConfig::new(
            "127.0.0.1:0",
            Arc::new(FixtureIdentityProvider),
            Arc::new(RepositoryListingService::new(Arc::new(
                FixtureRepositoryListingSource,
            ))),
        );
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).await.expect("state"),
        }
    }

    #[rstest]
    #[case("/api/profile")]
    #[case("/api/profile/")]
    #[actix_web::test]
    async fn list_route_accepts_trailing_slash(#[case] uri: &str) {
        let app = test::init_service(build_app(deps().await)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn profile_round_trip_through_the_memory_store() {
        let app = test::init_service(build_app(deps().await)).await;

        let create = test::TestRequest::post()
            .uri("/api/profile")
            .insert_header((AUTHORIZATION, format!("Bearer {CALLER}")))
            .set_json(json!({ "status": "Developer", "skills": "rust, sql" }))
            .to_request();
        let res = test::call_service(&app, create).await;
        assert_eq!(res.status(), StatusCode::OK);

        let fetch = test::TestRequest::get()
            .uri(&format!("/api/profile/user/{CALLER}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, fetch).await;
        assert_eq!(body["skills"], json!(["rust", "sql"]));
        assert_eq!(body["user"], Value::Null);
    }

    #[actix_web::test]
    async fn malformed_json_is_a_client_error() {
        let app = test::init_service(build_app(deps().await)).await;
        let req = test::TestRequest::post()
            .uri("/api/profile")
            .insert_header((AUTHORIZATION, format!("Bearer {CALLER}")))
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
