//! User persistence port.

use async_trait::async_trait;

use super::repository::Repository;
use super::store::StoreError;
use crate::domain::user::User;

/// User persistence with email lookup layered on the generic operations.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// The unique user with `email`, if any.
    ///
    /// Emails compare ordinally. Uniqueness itself is enforced by the store
    /// when staged writes are flushed, not here.
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
