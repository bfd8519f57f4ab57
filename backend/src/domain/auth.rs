//! Authentication request and response payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Request-scoped credential secret.
///
/// Wraps the plaintext so debug output stays redacted and the buffer is
/// wiped when the request is dropped. Only [`Password::reveal`] exposes the
/// plaintext, for handing to the credential hasher.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a plaintext secret.
    #[must_use]
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(Zeroizing::new(plaintext.into()))
    }

    /// Borrow the plaintext for hashing or verification.
    #[must_use]
    pub fn reveal(&self) -> &str {
        &self.0
    }

    /// Character count of the plaintext.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Whether the plaintext is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

impl From<&str> for Password {
    fn from(plaintext: &str) -> Self {
        Self::new(plaintext)
    }
}

impl From<String> for Password {
    fn from(plaintext: String) -> Self {
        Self::new(plaintext)
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Credentials presented at login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password to verify.
    pub password: Password,
}

/// Details for creating an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired account email; must be unused.
    pub email: String,
    /// Plaintext password to hash and store.
    pub password: Password,
}

/// Issued access token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Opaque access token.
    pub token: String,
    /// Token scheme; always `"Bearer"`.
    pub token_type: String,
    /// Instant the token stops being valid.
    pub expires_at: DateTime<Utc>,
}

/// Projection of a freshly registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    /// Generated account identifier.
    pub id: String,
    /// Registered email.
    pub email: String,
    /// Human-readable confirmation.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, Password};

    #[test]
    fn password_debug_output_is_redacted() {
        let request = LoginRequest {
            email: "a@b.com".into(),
            password: Password::new("hunter2"),
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn password_reveals_plaintext_and_counts_characters() {
        let password = Password::new("abc123");
        assert_eq!(password.reveal(), "abc123");
        assert_eq!(password.len(), 6);
        assert!(!password.is_empty());
        assert!(Password::new("").is_empty());
    }

    #[test]
    fn password_deserializes_from_a_json_string() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"secret"}"#)
                .expect("valid login payload");
        assert_eq!(request.password.reveal(), "secret");
    }
}
