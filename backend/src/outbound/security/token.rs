//! Signed access tokens.
//!
//! A token is `hex(claims JSON)`, a dot, and the hex SHA-256 digest of the
//! secret followed by the claims JSON. The claims are readable by anyone;
//! the signature binds them to the configured secret.
//! [`SignedTokenIssuer::decode`] verifies a token and reads the claims
//! back, which is how tests inspect issued tokens.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::config::TokenSettings;
use crate::domain::ports::TokenIssuer;

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Rejected token signing configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    /// The signing secret is shorter than the required minimum.
    #[error("token signing secret must be at least {minimum} bytes")]
    SecretTooShort {
        /// The required minimum length in bytes.
        minimum: usize,
    },
}

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user identifier.
    pub sub: String,
    /// Email attached to the subject.
    pub email: String,
    /// Issuer tag from configuration.
    pub iss: String,
    /// Audience tag from configuration.
    pub aud: String,
    /// Unique identifier of this token.
    pub jti: String,
    /// Issued-at instant.
    pub iat: DateTime<Utc>,
    /// Expiry instant.
    pub exp: DateTime<Utc>,
}

/// Issues and verifies signed tokens with the configured secret.
pub struct SignedTokenIssuer {
    settings: TokenSettings,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SignedTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignedTokenIssuer").finish_non_exhaustive()
    }
}

impl SignedTokenIssuer {
    /// Create the issuer after checking the secret length.
    ///
    /// # Errors
    ///
    /// Returns [`TokenConfigError::SecretTooShort`] when the secret is
    /// under [`MIN_SECRET_BYTES`] bytes.
    pub fn new(settings: TokenSettings, clock: Arc<dyn Clock>) -> Result<Self, TokenConfigError> {
        if settings.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenConfigError::SecretTooShort {
                minimum: MIN_SECRET_BYTES,
            });
        }
        Ok(Self { settings, clock })
    }

    /// Read the claims back out of `token`, verifying its signature.
    ///
    /// Returns `None` for any token this issuer did not sign: wrong shape,
    /// wrong signature, or claims that fail to parse.
    #[must_use]
    pub fn decode(&self, token: &str) -> Option<TokenClaims> {
        let (payload, signature) = token.split_once('.')?;
        let payload = hex::decode(payload).ok()?;
        let payload = String::from_utf8(payload).ok()?;
        if self.sign(&payload) != signature {
            return None;
        }
        serde_json::from_str(&payload).ok()
    }

    fn sign(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.settings.secret.as_bytes());
        hasher.update(payload.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl TokenIssuer for SignedTokenIssuer {
    fn issue(&self, user_id: &str, email: &str) -> String {
        let iat = self.clock.utc();
        let claims = serde_json::json!({
            "sub": user_id,
            "email": email,
            "iss": self.settings.issuer,
            "aud": self.settings.audience,
            "jti": Uuid::new_v4().to_string(),
            "iat": iat,
            "exp": iat + Duration::minutes(self.settings.expiration_minutes),
        })
        .to_string();
        format!("{}.{}", hex::encode(claims.as_bytes()), self.sign(&claims))
    }
}
