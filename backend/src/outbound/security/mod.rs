//! Credential and token adapters.

pub mod password;
pub mod token;

pub use self::password::Sha256PasswordHasher;
pub use self::token::{MIN_SECRET_BYTES, SignedTokenIssuer, TokenClaims, TokenConfigError};
