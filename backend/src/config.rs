//! Token configuration.

use serde::Deserialize;

const DEFAULT_EXPIRATION_MINUTES: i64 = 1440;

/// Settings governing issued access tokens.
///
/// Loading these from a file or the environment is the host's concern; the
/// core only consumes the values. The auth service reads the time-to-live
/// from here, and the token issuer embeds the issuer and audience tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSettings {
    /// Signing secret. The token issuer rejects secrets shorter than 32
    /// bytes at construction.
    pub secret: String,
    /// Issuer tag embedded in tokens.
    pub issuer: String,
    /// Audience tag embedded in tokens.
    pub audience: String,
    /// Token time-to-live in minutes. Defaults to one day.
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

impl TokenSettings {
    /// Settings with the default one-day time-to-live.
    #[must_use]
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }

    /// Override the time-to-live.
    #[must_use]
    pub fn with_expiration_minutes(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }
}

const fn default_expiration_minutes() -> i64 {
    DEFAULT_EXPIRATION_MINUTES
}

#[cfg(test)]
mod tests {
    use super::TokenSettings;

    #[test]
    fn new_defaults_to_a_one_day_ttl() {
        let settings = TokenSettings::new("secret", "issuer", "audience");
        assert_eq!(settings.expiration_minutes, 1440);
    }

    #[test]
    fn ttl_can_be_overridden() {
        let settings = TokenSettings::new("secret", "issuer", "audience")
            .with_expiration_minutes(60);
        assert_eq!(settings.expiration_minutes, 60);
    }

    #[test]
    fn deserialization_fills_the_default_ttl() {
        let settings: TokenSettings = serde_json::from_str(
            r#"{"secret":"0123456789abcdef0123456789abcdef","issuer":"api","audience":"clients"}"#,
        )
        .expect("valid settings payload");
        assert_eq!(settings.expiration_minutes, 1440);
        assert_eq!(settings.issuer, "api");
    }

    #[test]
    fn deserialization_honours_an_explicit_ttl() {
        let settings: TokenSettings = serde_json::from_str(
            r#"{"secret":"s","issuer":"api","audience":"clients","expirationMinutes":15}"#,
        )
        .expect("valid settings payload");
        assert_eq!(settings.expiration_minutes, 15);
    }
}
