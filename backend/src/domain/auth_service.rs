//! Authentication service.
//!
//! Login is a read path: a lookup and a hash check, no transaction, and a
//! single vague failure message so callers cannot tell whether the email or
//! the password was wrong. Registration is a write path: the duplicate-email
//! check runs before the transaction opens, then the insert runs begin,
//! stage, save, commit, with a rollback on any store fault.

use std::sync::Arc;

use chrono::Duration;
use mockable::Clock;
use tracing::warn;

use super::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use super::outcome::Outcome;
use super::ports::{PasswordHasher, StoreError, TokenIssuer, UnitOfWork, UserRepository};
use super::user::User;
use crate::config::TokenSettings;

/// Failure message shared by both login rejection causes.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";
/// Failure message for registering an email that is already taken.
pub const DUPLICATE_EMAIL: &str = "A user with this email already exists.";
/// Confirmation message for a completed registration.
pub const REGISTRATION_CONFIRMED: &str = "User registered successfully.";
/// Token scheme reported alongside every issued token.
pub const TOKEN_TYPE: &str = "Bearer";

/// Authentication operations over user persistence and the credential
/// collaborators.
#[derive(Clone)]
pub struct AuthService<R, H, T, U> {
    users: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    unit_of_work: Arc<U>,
    clock: Arc<dyn Clock>,
    settings: TokenSettings,
}

impl<R, H, T, U> AuthService<R, H, T, U>
where
    R: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
    U: UnitOfWork,
{
    /// Create the service over its collaborators.
    pub fn new(
        users: Arc<R>,
        hasher: Arc<H>,
        tokens: Arc<T>,
        unit_of_work: Arc<U>,
        clock: Arc<dyn Clock>,
        settings: TokenSettings,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            unit_of_work,
            clock,
            settings,
        }
    }

    /// Authenticate a user and issue an access token.
    ///
    /// An unknown email and a wrong password produce the identical failure
    /// message; a distinct message would leak which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the user lookup hits a store fault.
    pub async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<Outcome<LoginResponse>, StoreError> {
        let Some(user) = self.users.get_by_email(&request.email).await? else {
            return Ok(Outcome::failure(INVALID_CREDENTIALS));
        };
        if !self
            .hasher
            .verify(request.password.reveal(), user.password_hash())
        {
            return Ok(Outcome::failure(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(&user.id().to_string(), user.email());
        let expires_at = self.clock.utc() + Duration::minutes(self.settings.expiration_minutes);
        Ok(Outcome::success(LoginResponse {
            token,
            token_type: TOKEN_TYPE.to_owned(),
            expires_at,
        }))
    }

    /// Create an account for an email that is not yet taken.
    ///
    /// A taken email is a domain failure and is detected before the
    /// transaction opens, so no transaction is started for it. The insert
    /// itself is transactional.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when a lookup, flush, or commit hits a store
    /// fault; the open transaction is rolled back first.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<Outcome<RegisterResponse>, StoreError> {
        if self.users.get_by_email(&request.email).await?.is_some() {
            return Ok(Outcome::failure(DUPLICATE_EMAIL));
        }

        self.unit_of_work.begin_transaction().await?;
        match self.persist_account(request).await {
            Ok(response) => Ok(Outcome::success(response)),
            Err(fault) => {
                self.roll_back_after(&fault).await;
                Err(fault)
            }
        }
    }

    async fn persist_account(
        &self,
        request: &RegisterRequest,
    ) -> Result<RegisterResponse, StoreError> {
        let hash = self.hasher.hash(request.password.reveal());
        let user = User::new(request.email.clone(), hash, self.clock.utc());
        let id = user.id().to_string();
        let email = user.email().to_owned();

        self.users.add(user).await?;
        self.unit_of_work.save().await?;
        self.unit_of_work.commit_transaction().await?;

        Ok(RegisterResponse {
            id,
            email,
            message: REGISTRATION_CONFIRMED.to_owned(),
        })
    }

    /// Roll back after `fault`, logging rather than masking a rollback
    /// failure so the original fault is the one the caller sees.
    async fn roll_back_after(&self, fault: &StoreError) {
        if let Err(rollback_error) = self.unit_of_work.rollback_transaction().await {
            warn!(%fault, %rollback_error, "rollback after failed registration also failed");
        }
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
