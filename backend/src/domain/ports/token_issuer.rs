//! Access token issuing port.

/// Opaque access-token issuing collaborator.
///
/// The token format is the implementation's business; the validity window
/// is driven by the configured expiration minutes and the reported expiry
/// is computed by the auth service, not here.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Issue a token whose subject is `user_id`, with `email` attached.
    fn issue(&self, user_id: &str, email: &str) -> String;
}
