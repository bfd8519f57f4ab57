//! Domain core: entities, specifications, services, and the ports they
//! drive.
//!
//! Everything here is store-agnostic. Persistence, credential hashing, and
//! token issuing reach the domain only through the contracts in [`ports`],
//! so the services exercise the same code paths against test doubles and
//! against the in-memory store.
//!
//! Public surface:
//! - [`Outcome`]: success or accumulated domain failure messages.
//! - [`User`] / [`Forecast`]: the two persisted entities.
//! - [`Specification`] and its implementations: composable query predicates.
//! - [`AuthService`] / [`ForecastService`] / [`SeedService`]: the
//!   operations, each transactional on its write paths.

pub mod auth;
pub mod auth_service;
pub mod entity;
pub mod forecast;
pub mod forecast_service;
pub mod outcome;
pub mod ports;
pub mod seed_service;
pub mod specification;
pub mod user;

pub use self::auth::{LoginRequest, LoginResponse, Password, RegisterRequest, RegisterResponse};
pub use self::auth_service::AuthService;
pub use self::entity::Entity;
pub use self::forecast::{Forecast, ForecastId, Temperature};
pub use self::forecast_service::{
    CreateForecastRequest, CreateForecastResponse, ForecastDto, ForecastListResponse,
    ForecastService, TemperatureRangeRequest, TemperatureRangeResponse,
};
pub use self::outcome::Outcome;
pub use self::seed_service::SeedService;
pub use self::specification::{
    DateRangeSpecification, EmailEqualsSpecification, Specification, SummaryContainsSpecification,
    TemperatureRangeSpecification, UpcomingWeekSpecification,
};
pub use self::user::{User, UserId};
