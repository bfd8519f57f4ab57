//! Credential hashing port.

/// Opaque credential hashing collaborator.
///
/// The hash format is the implementation's business; the domain only ever
/// stores it and hands it back for verification.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` into an opaque, self-contained string.
    fn hash(&self, plaintext: &str) -> String;

    /// Check `plaintext` against a previously produced `hash`.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}
