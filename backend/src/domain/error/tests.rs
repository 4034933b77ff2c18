//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::invalid_request("bad")).expect("serialise");
    assert_eq!(value, json!({ "code": "invalid_request", "message": "bad" }));

    let value = serde_json::to_value(
        Error::not_found("gone")
            .with_trace_id(TRACE_ID)
            .with_details(json!({ "code": "profile_not_found" })),
    )
    .expect("serialise");
    assert_eq!(
        value,
        json!({
            "code": "not_found",
            "message": "gone",
            "traceId": TRACE_ID,
            "details": { "code": "profile_not_found" },
        })
    );
}

#[rstest]
fn deserialisation_rejects_blank_trace_ids() {
    let result: Result<Error, _> = serde_json::from_value(json!({
        "code": "internal_error",
        "message": "boom",
        "traceId": "  ",
    }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialisation_does_not_pick_up_ambient_trace(trace_id: TraceId) {
    let error: Error = TraceId::scope(trace_id, async {
        serde_json::from_value(json!({ "code": "not_found", "message": "gone" }))
            .expect("valid payload")
    })
    .await;
    assert!(error.trace_id().is_none());
}
