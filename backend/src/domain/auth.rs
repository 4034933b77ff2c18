//! Authentication primitives.
//!
//! Inbound adapters extract the raw bearer credential and wrap it in
//! [`AccessToken`] before handing it to the identity port.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when a credential value is unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessTokenValidationError {
    /// The credential was missing or blank once trimmed.
    Empty,
}

impl fmt::Display for AccessTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "access token must not be empty"),
        }
    }
}

impl std::error::Error for AccessTokenValidationError {}

/// Opaque caller credential.
///
/// The secret is zeroised on drop and never printed by `Debug`.
///
/// # Examples
/// ```
/// use profiles::domain::AccessToken;
///
/// let token = AccessToken::new("  abc.def ").expect("non-empty token");
/// assert_eq!(token.expose(), "abc.def");
/// assert!(AccessToken::new("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Construct a token from a raw header value, trimming whitespace.
    pub fn new(raw: &str) -> Result<Self, AccessTokenValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AccessTokenValidationError::Empty);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Borrow the secret for verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}
