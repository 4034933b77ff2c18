//! Bearer credential extraction for HTTP handlers.
//!
//! Handlers that need a caller take an [`AuthenticatedUser`] argument. The
//! extractor reads `Authorization: Bearer <token>` or the legacy
//! `x-auth-token` header, then asks the identity port for the user id.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccessToken, Error, UserId};

use super::state::HttpState;

/// Legacy header carrying the raw token.
pub const LEGACY_TOKEN_HEADER: &str = "x-auth-token";

const MISSING_TOKEN_MESSAGE: &str = "No token, authorization denied";

/// Caller identity resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Pull the raw credential from the request headers.
///
/// `Authorization` wins when both headers are present.
fn raw_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then_some(token)
        });
    bearer.or_else(|| {
        headers
            .get(LEGACY_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = raw_token(req.headers()).map(AccessToken::new);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let token = match token {
                Some(Ok(token)) => token,
                Some(Err(_)) | None => return Err(Error::unauthorized(MISSING_TOKEN_MESSAGE)),
            };
            let Some(state) = state else {
                warn!("HTTP state missing; cannot resolve caller");
                return Err(Error::internal("HTTP state is not configured"));
            };
            state.identity.resolve(&token).await.map(AuthenticatedUser)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockIdentityProvider;
    use crate::inbound::http::test_utils::http_state;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};
    use rstest::rstest;

    const CALLER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    #[case(TestRequest::default().insert_header((AUTHORIZATION, "Bearer abc")), Some("abc"))]
    #[case(TestRequest::default().insert_header((AUTHORIZATION, "bearer abc")), Some("abc"))]
    #[case(TestRequest::default().insert_header((LEGACY_TOKEN_HEADER, "xyz")), Some("xyz"))]
    #[case(
        TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .insert_header((LEGACY_TOKEN_HEADER, "xyz")),
        Some("abc")
    )]
    #[case(TestRequest::default().insert_header((AUTHORIZATION, "Basic abc")), None)]
    #[case(TestRequest::default(), None)]
    fn reads_supported_headers(#[case] request: TestRequest, #[case] expected: Option<&str>) {
        let req = request.to_http_request();
        assert_eq!(raw_token(req.headers()), expected);
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    #[actix_web::test]
    async fn resolves_caller_through_identity_port() {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state().build())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let req = TestRequest::get()
            .uri("/whoami")
            .insert_header((AUTHORIZATION, format!("Bearer {CALLER}")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, CALLER);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Bearer    "))]
    #[actix_web::test]
    async fn missing_credentials_are_unauthorised(#[case] header: Option<&str>) {
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state().build())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let mut req = TestRequest::get().uri("/whoami");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Error = actix_test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
        assert_eq!(body.message(), MISSING_TOKEN_MESSAGE);
    }

    #[actix_web::test]
    async fn rejected_credentials_surface_provider_error() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_resolve()
            .times(1)
            .return_once(|_| Err(Error::unauthorized("Token is not valid")));
        let app = actix_test::init_service(
            App::new()
                .app_data(http_state().with_identity(identity).build())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;
        let req = TestRequest::get()
            .uri("/whoami")
            .insert_header((LEGACY_TOKEN_HEADER, "forged"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
