//! Shared validation helpers for inbound HTTP adapters.
//!
//! Handlers collect every field problem before touching a port and report
//! them together as one `invalid_request` error whose `details.errors` lists
//! `{field, message, code}` objects in the order they were found.

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde_json::json;

use crate::domain::{Error, present};

/// Top-level message for payloads that fail field validation.
pub(crate) const VALIDATION_FAILED_MESSAGE: &str = "Request validation failed";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct FieldError {
    field: &'static str,
    message: String,
    code: &'static str,
}

/// Ordered collection of field failures for one request.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: FieldName, message: impl Into<String>, code: ErrorCode) {
        self.0.push(FieldError {
            field: field.as_str(),
            message: message.into(),
            code: code.as_str(),
        });
    }

    /// Require a non-empty string, recording `message` when it is absent.
    pub(crate) fn require(
        &mut self,
        value: Option<String>,
        field: FieldName,
        message: &str,
    ) -> Option<String> {
        match present(value) {
            Some(value) => Some(value),
            None => {
                self.push(field, message, ErrorCode::MissingField);
                None
            }
        }
    }

    /// Require a date, recording a missing or unparsable value.
    pub(crate) fn require_date(
        &mut self,
        value: Option<String>,
        field: FieldName,
        message: &str,
    ) -> Option<NaiveDate> {
        let raw = self.require(value, field, message)?;
        self.parse_date(&raw, field)
    }

    /// Parse an optional date; empty input counts as absent.
    pub(crate) fn optional_date(
        &mut self,
        value: Option<String>,
        field: FieldName,
    ) -> Option<NaiveDate> {
        let raw = present(value)?;
        self.parse_date(&raw, field)
    }

    fn parse_date(&mut self, raw: &str, field: FieldName) -> Option<NaiveDate> {
        let parsed = parse_entry_date(raw);
        if parsed.is_none() {
            self.push(
                field,
                format!("{} must be a YYYY-MM-DD date or an RFC 3339 timestamp", field.as_str()),
                ErrorCode::InvalidDate,
            );
        }
        parsed
    }

    /// Finish validation, returning the error when anything was recorded.
    pub(crate) fn finish(self) -> Result<(), Error> {
        if self.0.is_empty() {
            return Ok(());
        }
        Err(Error::invalid_request(VALIDATION_FAILED_MESSAGE)
            .with_details(json!({ "errors": self.0 })))
    }
}

/// Parse an entry date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date of their own offset.
pub(crate) fn parse_entry_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}
