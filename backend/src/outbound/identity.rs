//! Signed bearer token identity adapter.
//!
//! Tokens have the form `<user-uuid>.<hex sha256(secret ":" user-uuid)>`.
//! The issuing system shares the secret with this service; nothing else about
//! the caller is stored here.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::IdentityProvider;
use crate::domain::{AccessToken, Error, UserId};

const INVALID_TOKEN_MESSAGE: &str = "Token is not valid";

/// Identity provider verifying tokens signed with a shared secret.
pub struct SignedTokenIdentityProvider {
    secret: Zeroizing<Vec<u8>>,
}

impl SignedTokenIdentityProvider {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: Zeroizing::new(secret.as_ref().to_vec()),
        }
    }

    /// Mint a token for `user_id`.
    ///
    /// # Examples
    /// ```
    /// use profiles::domain::UserId;
    /// use profiles::outbound::identity::SignedTokenIdentityProvider;
    ///
    /// let provider = SignedTokenIdentityProvider::new("s3cret");
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("uuid");
    /// let token = provider.issue(&id);
    /// assert!(token.starts_with("3fa85f64-5717-4562-b3fc-2c963f66afa6."));
    /// ```
    pub fn issue(&self, user_id: &UserId) -> String {
        format!("{user_id}.{}", self.signature(user_id.as_ref()))
    }

    fn signature(&self, subject: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_slice());
        hasher.update(b":");
        hasher.update(subject.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn verify(&self, raw: &str) -> Option<UserId> {
        let (subject, signature) = raw.split_once('.')?;
        let user_id = UserId::new(subject).ok()?;
        // Sign the canonical form so mixed-case ids cannot mint a second token.
        let expected = self.signature(user_id.as_ref());
        constant_time_eq(expected.as_bytes(), signature.to_ascii_lowercase().as_bytes())
            .then_some(user_id)
    }
}

impl std::fmt::Debug for SignedTokenIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SignedTokenIdentityProvider { secret: **redacted** }")
    }
}

#[async_trait]
impl IdentityProvider for SignedTokenIdentityProvider {
    async fn resolve(&self, token: &AccessToken) -> Result<UserId, Error> {
        self.verify(token.expose()).ok_or_else(|| {
            warn!("rejected bearer token");
            Error::unauthorized(INVALID_TOKEN_MESSAGE)
        })
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
