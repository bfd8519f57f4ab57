//! Tests for the authentication service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockTokenIssuer, MockUnitOfWork, Repository};
use crate::domain::specification::Specification;
use crate::domain::user::UserId;
use crate::test_support::FixedClock;

/// Canned user repository: one optional pre-existing user plus a capture of
/// everything staged through `add`.
#[derive(Default)]
struct StubUserRepository {
    existing: Option<User>,
    added: Mutex<Vec<User>>,
}

impl StubUserRepository {
    fn empty() -> Self {
        Self::default()
    }

    fn with_user(user: User) -> Self {
        Self {
            existing: Some(user),
            added: Mutex::new(Vec::new()),
        }
    }

    fn added_users(&self) -> Vec<User> {
        self.added.lock().expect("stub lock poisoned").clone()
    }
}

#[async_trait]
impl Repository<User> for StubUserRepository {
    async fn add(&self, entity: User) -> Result<(), StoreError> {
        self.added.lock().expect("stub lock poisoned").push(entity);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.existing.iter().cloned().collect())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.existing.clone().filter(|user| user.id() == id))
    }

    async fn find_by_specification(
        &self,
        specification: &dyn Specification<User>,
    ) -> Result<Vec<User>, StoreError> {
        Ok(self
            .existing
            .iter()
            .filter(|user| specification.is_satisfied_by(user))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.existing.clone().filter(|user| user.email() == email))
    }
}

type TestAuthService =
    AuthService<StubUserRepository, MockPasswordHasher, MockTokenIssuer, MockUnitOfWork>;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn settings() -> TokenSettings {
    TokenSettings::new(
        "0123456789abcdef0123456789abcdef",
        "weather-api",
        "weather-clients",
    )
    .with_expiration_minutes(60)
}

fn service(
    users: StubUserRepository,
    hasher: MockPasswordHasher,
    tokens: MockTokenIssuer,
    unit_of_work: MockUnitOfWork,
) -> (TestAuthService, Arc<StubUserRepository>) {
    let users = Arc::new(users);
    let service = AuthService::new(
        Arc::clone(&users),
        Arc::new(hasher),
        Arc::new(tokens),
        Arc::new(unit_of_work),
        Arc::new(FixedClock::new(fixed_now())),
        settings(),
    );
    (service, users)
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_owned(),
        password: password.into(),
    }
}

fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_owned(),
        password: password.into(),
    }
}

fn stored_user(email: &str, password_hash: &str) -> User {
    User::new(email.to_owned(), password_hash.to_owned(), fixed_now())
}

#[tokio::test]
async fn login_rejects_an_unknown_email() {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);
    let (service, _) = service(
        StubUserRepository::empty(),
        hasher,
        MockTokenIssuer::new(),
        MockUnitOfWork::new(),
    );

    let outcome = service
        .login(&login_request("missing@example.com", "Secret@123"))
        .await
        .expect("login should not hit a store fault");

    assert_eq!(outcome.errors(), [INVALID_CREDENTIALS]);
}

#[tokio::test]
async fn login_rejects_a_wrong_password_with_the_same_message() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|plaintext, hash| plaintext == "WrongPass1" && hash == "stored-hash")
        .times(1)
        .return_const(false);
    let (service, _) = service(
        StubUserRepository::with_user(stored_user("user@example.com", "stored-hash")),
        hasher,
        MockTokenIssuer::new(),
        MockUnitOfWork::new(),
    );

    let outcome = service
        .login(&login_request("user@example.com", "WrongPass1"))
        .await
        .expect("login should not hit a store fault");

    assert_eq!(outcome.errors(), [INVALID_CREDENTIALS]);
}

#[tokio::test]
async fn login_issues_a_bearer_token_for_valid_credentials() {
    let user = stored_user("user@example.com", "stored-hash");
    let subject = user.id().to_string();

    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(1).return_const(true);
    let mut tokens = MockTokenIssuer::new();
    tokens
        .expect_issue()
        .withf(move |user_id, email| user_id == subject.as_str() && email == "user@example.com")
        .times(1)
        .return_once(|_, _| "token-123".to_owned());
    let (service, _) = service(
        StubUserRepository::with_user(user),
        hasher,
        tokens,
        MockUnitOfWork::new(),
    );

    let outcome = service
        .login(&login_request("user@example.com", "Secret@123"))
        .await
        .expect("login should not hit a store fault");

    let response = outcome.value().expect("login should succeed");
    assert_eq!(response.token, "token-123");
    assert_eq!(response.token_type, TOKEN_TYPE);
    assert_eq!(response.expires_at, fixed_now() + Duration::minutes(60));
}

#[tokio::test]
async fn register_rejects_a_taken_email_without_opening_a_transaction() {
    let mut unit_of_work = MockUnitOfWork::new();
    unit_of_work.expect_begin_transaction().times(0);
    let (service, users) = service(
        StubUserRepository::with_user(stored_user("taken@example.com", "stored-hash")),
        MockPasswordHasher::new(),
        MockTokenIssuer::new(),
        unit_of_work,
    );

    let outcome = service
        .register(&register_request("taken@example.com", "Secret@123"))
        .await
        .expect("register should not hit a store fault");

    assert_eq!(outcome.errors(), [DUPLICATE_EMAIL]);
    assert!(users.added_users().is_empty());
}

#[tokio::test]
async fn register_persists_a_hashed_user_inside_one_transaction() {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|plaintext| format!("hashed:{plaintext}"));
    let mut unit_of_work = MockUnitOfWork::new();
    unit_of_work
        .expect_begin_transaction()
        .times(1)
        .return_once(|| Ok(()));
    unit_of_work.expect_save().times(1).return_once(|| Ok(1));
    unit_of_work
        .expect_commit_transaction()
        .times(1)
        .return_once(|| Ok(()));
    let (service, users) = service(
        StubUserRepository::empty(),
        hasher,
        MockTokenIssuer::new(),
        unit_of_work,
    );

    let outcome = service
        .register(&register_request("new@example.com", "Secret@123"))
        .await
        .expect("register should not hit a store fault");

    let response = outcome.value().expect("registration should succeed");
    assert_eq!(response.email, "new@example.com");
    assert_eq!(response.message, REGISTRATION_CONFIRMED);
    Uuid::parse_str(&response.id).expect("response id should be the generated user id");

    let added = users.added_users();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].email(), "new@example.com");
    assert_eq!(added[0].password_hash(), "hashed:Secret@123");
    assert_eq!(added[0].created_at(), fixed_now());
}

#[tokio::test]
async fn register_rolls_back_and_reraises_a_flush_fault() {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(1).return_const("hash".to_owned());
    let mut unit_of_work = MockUnitOfWork::new();
    unit_of_work
        .expect_begin_transaction()
        .times(1)
        .return_once(|| Ok(()));
    unit_of_work
        .expect_save()
        .times(1)
        .return_once(|| Err(StoreError::connection("disk full")));
    unit_of_work.expect_commit_transaction().times(0);
    unit_of_work
        .expect_rollback_transaction()
        .times(1)
        .return_once(|| Ok(()));
    let (service, _) = service(
        StubUserRepository::empty(),
        hasher,
        MockTokenIssuer::new(),
        unit_of_work,
    );

    let fault = service
        .register(&register_request("new@example.com", "Secret@123"))
        .await
        .expect_err("a store fault must surface as an error, not a failure outcome");

    assert!(matches!(fault, StoreError::Connection { .. }));
}

#[tokio::test]
async fn register_reports_the_original_fault_when_rollback_also_fails() {
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(1).return_const("hash".to_owned());
    let mut unit_of_work = MockUnitOfWork::new();
    unit_of_work
        .expect_begin_transaction()
        .times(1)
        .return_once(|| Ok(()));
    unit_of_work
        .expect_save()
        .times(1)
        .return_once(|| Err(StoreError::connection("disk full")));
    unit_of_work
        .expect_rollback_transaction()
        .times(1)
        .return_once(|| Err(StoreError::transaction("no transaction to roll back")));
    let (service, _) = service(
        StubUserRepository::empty(),
        hasher,
        MockTokenIssuer::new(),
        unit_of_work,
    );

    let fault = service
        .register(&register_request("new@example.com", "Secret@123"))
        .await
        .expect_err("a store fault must surface as an error");

    assert!(matches!(fault, StoreError::Connection { .. }));
    assert_eq!(fault.to_string(), "store connection failed: disk full");
}
