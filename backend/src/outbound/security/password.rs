//! Salted SHA-256 credential hashing.
//!
//! The output is self-contained: `hex(salt)$hex(digest)` where the digest
//! covers the salt bytes followed by the password bytes. A fresh random
//! salt per hash keeps equal passwords from producing equal hashes.

use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::domain::ports::PasswordHasher;

const SALT_BYTES: usize = 16;
const SEPARATOR: char = '$';

/// Hashes credentials with a fresh random salt per password.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256PasswordHasher;

impl Sha256PasswordHasher {
    /// Create the hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn digest(salt: &[u8], plaintext: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(plaintext.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl PasswordHasher for Sha256PasswordHasher {
    fn hash(&self, plaintext: &str) -> String {
        let mut salt = [0_u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        format!(
            "{}{SEPARATOR}{}",
            hex::encode(salt),
            Self::digest(&salt, plaintext)
        )
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Some((salt, digest)) = hash.split_once(SEPARATOR) else {
            return false;
        };
        let Ok(salt) = hex::decode(salt) else {
            return false;
        };
        Self::digest(&salt, plaintext) == digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_salts_each_password_freshly() {
        let hasher = Sha256PasswordHasher::new();
        let first = hasher.hash("Secret@123");
        let second = hasher.hash("Secret@123");

        assert_ne!(first, second);
        assert!(hasher.verify("Secret@123", &first));
        assert!(hasher.verify("Secret@123", &second));
    }

    #[test]
    fn the_hash_never_contains_the_plaintext() {
        let hasher = Sha256PasswordHasher::new();
        let hash = hasher.hash("Secret@123");

        assert!(!hash.contains("Secret@123"));
    }

    #[test]
    fn a_wrong_password_fails_verification() {
        let hasher = Sha256PasswordHasher::new();
        let hash = hasher.hash("Secret@123");

        assert!(!hasher.verify("WrongPass1", &hash));
    }

    #[test]
    fn malformed_hashes_fail_verification_quietly() {
        let hasher = Sha256PasswordHasher::new();

        assert!(!hasher.verify("Secret@123", "not-a-hash"));
        assert!(!hasher.verify("Secret@123", "zz$not-hex-salt"));
        assert!(!hasher.verify("Secret@123", ""));
    }
}
