//! Driven ports: contracts the domain consumes.
//!
//! Public surface:
//! - [`StoreError`]: fault classification for everything store-facing.
//! - [`Repository`]: generic CRUD plus specification queries.
//! - [`UserRepository`] / [`ForecastRepository`]: type-specific extensions.
//! - [`UnitOfWork`]: the transaction boundary.
//! - [`PasswordHasher`] / [`TokenIssuer`]: opaque credential collaborators.

pub mod forecast_repository;
pub mod password_hasher;
pub mod repository;
pub mod store;
pub mod token_issuer;
pub mod unit_of_work;
pub mod user_repository;

pub use self::forecast_repository::ForecastRepository;
pub use self::password_hasher::PasswordHasher;
pub use self::repository::Repository;
pub use self::store::StoreError;
pub use self::token_issuer::TokenIssuer;
pub use self::unit_of_work::UnitOfWork;
pub use self::user_repository::UserRepository;

#[cfg(test)]
pub use self::password_hasher::MockPasswordHasher;
#[cfg(test)]
pub use self::token_issuer::MockTokenIssuer;
#[cfg(test)]
pub use self::unit_of_work::MockUnitOfWork;
