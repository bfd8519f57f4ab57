//! Handlers bridging dispatched requests to the domain services.
//!
//! Each handler serves exactly one request kind, unwraps that kind's
//! payload, and wraps the service outcome back into the shared response
//! envelope. Store faults convert into dispatch faults via `?`.

use std::sync::Arc;

use async_trait::async_trait;

use super::mediator::{DispatchError, RequestHandler};
use super::request::{Request, RequestKind, Response};
use crate::domain::auth_service::AuthService;
use crate::domain::forecast_service::ForecastService;
use crate::domain::outcome::Outcome;
use crate::domain::ports::{
    ForecastRepository, PasswordHasher, TokenIssuer, UnitOfWork, UserRepository,
};

/// Serves [`RequestKind::Login`].
pub struct LoginHandler<R, H, T, U> {
    service: Arc<AuthService<R, H, T, U>>,
}

impl<R, H, T, U> LoginHandler<R, H, T, U> {
    /// Wrap the auth service.
    pub fn new(service: Arc<AuthService<R, H, T, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, H, T, U> RequestHandler for LoginHandler<R, H, T, U>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::Login
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        let Request::Login(payload) = request else {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::Login,
                actual,
            });
        };
        Ok(self.service.login(&payload).await?.map(Response::Login))
    }
}

/// Serves [`RequestKind::Register`].
pub struct RegisterHandler<R, H, T, U> {
    service: Arc<AuthService<R, H, T, U>>,
}

impl<R, H, T, U> RegisterHandler<R, H, T, U> {
    /// Wrap the auth service.
    pub fn new(service: Arc<AuthService<R, H, T, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, H, T, U> RequestHandler for RegisterHandler<R, H, T, U>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::Register
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        let Request::Register(payload) = request else {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::Register,
                actual,
            });
        };
        Ok(self.service.register(&payload).await?.map(Response::Register))
    }
}

/// Serves [`RequestKind::CreateForecast`].
pub struct CreateForecastHandler<R, U> {
    service: Arc<ForecastService<R, U>>,
}

impl<R, U> CreateForecastHandler<R, U> {
    /// Wrap the forecast service.
    pub fn new(service: Arc<ForecastService<R, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, U> RequestHandler for CreateForecastHandler<R, U>
where
    R: ForecastRepository + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::CreateForecast
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        let Request::CreateForecast(payload) = request else {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::CreateForecast,
                actual,
            });
        };
        Ok(self
            .service
            .create(&payload)
            .await?
            .map(Response::ForecastCreated))
    }
}

/// Serves [`RequestKind::GetAllForecasts`].
pub struct GetAllForecastsHandler<R, U> {
    service: Arc<ForecastService<R, U>>,
}

impl<R, U> GetAllForecastsHandler<R, U> {
    /// Wrap the forecast service.
    pub fn new(service: Arc<ForecastService<R, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, U> RequestHandler for GetAllForecastsHandler<R, U>
where
    R: ForecastRepository + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::GetAllForecasts
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        if !matches!(request, Request::GetAllForecasts) {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::GetAllForecasts,
                actual,
            });
        }
        Ok(self.service.get_all().await?.map(Response::ForecastList))
    }
}

/// Serves [`RequestKind::GetUpcomingWeekForecasts`].
pub struct GetUpcomingWeekHandler<R, U> {
    service: Arc<ForecastService<R, U>>,
}

impl<R, U> GetUpcomingWeekHandler<R, U> {
    /// Wrap the forecast service.
    pub fn new(service: Arc<ForecastService<R, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, U> RequestHandler for GetUpcomingWeekHandler<R, U>
where
    R: ForecastRepository + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::GetUpcomingWeekForecasts
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        if !matches!(request, Request::GetUpcomingWeekForecasts) {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::GetUpcomingWeekForecasts,
                actual,
            });
        }
        Ok(self
            .service
            .get_upcoming_week()
            .await?
            .map(Response::ForecastList))
    }
}

/// Serves [`RequestKind::GetForecastsByTemperatureRange`].
pub struct TemperatureRangeHandler<R, U> {
    service: Arc<ForecastService<R, U>>,
}

impl<R, U> TemperatureRangeHandler<R, U> {
    /// Wrap the forecast service.
    pub fn new(service: Arc<ForecastService<R, U>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R, U> RequestHandler for TemperatureRangeHandler<R, U>
where
    R: ForecastRepository + 'static,
    U: UnitOfWork + 'static,
{
    fn kind(&self) -> RequestKind {
        RequestKind::GetForecastsByTemperatureRange
    }

    async fn handle(&self, request: Request) -> Result<Outcome<Response>, DispatchError> {
        let actual = request.kind();
        let Request::GetForecastsByTemperatureRange(payload) = request else {
            return Err(DispatchError::Misrouted {
                expected: RequestKind::GetForecastsByTemperatureRange,
                actual,
            });
        };
        Ok(self
            .service
            .get_by_temperature_range(&payload)
            .await?
            .map(Response::TemperatureRange))
    }
}
