//! Registered user accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entity::Entity;

/// Unique user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A registered account.
///
/// Constructed through [`User::new`] and immutable afterwards: accounts are
/// never edited in place, only looked up. The password hash is opaque to the
/// domain; only the credential hasher can interpret it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create an account from an email and a precomputed credential hash.
    ///
    /// The identifier is assigned here, exactly once. Email uniqueness is a
    /// store constraint, checked when staged writes are flushed.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::random(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at,
            updated_at: None,
        }
    }

    /// Stable identifier assigned at construction.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Account email, unique across the store.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Opaque credential hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Instant the account was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Instant of the last mutation; always `None` for accounts.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::User;

    #[test]
    fn new_assigns_identity_and_creation_instant() {
        let created_at = Utc
            .with_ymd_and_hms(2024, 4, 2, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let user = User::new("a@b.com", "hash", created_at);

        assert!(!user.id().to_string().is_empty());
        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.password_hash(), "hash");
        assert_eq!(user.created_at(), created_at);
        assert_eq!(user.updated_at(), None);
    }

    #[test]
    fn identifiers_are_unique_per_account() {
        let now = Utc::now();
        let first = User::new("a@b.com", "hash", now);
        let second = User::new("a@b.com", "hash", now);
        assert_ne!(first.id(), second.id());
    }
}
