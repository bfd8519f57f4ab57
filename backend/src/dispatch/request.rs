//! Request and response envelopes routed through the dispatch pipeline.

use std::fmt;

use crate::domain::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::domain::forecast_service::{
    CreateForecastRequest, CreateForecastResponse, ForecastListResponse, TemperatureRangeRequest,
    TemperatureRangeResponse,
};

/// A routable operation with its payload.
#[derive(Debug, Clone)]
pub enum Request {
    /// Authenticate and obtain an access token.
    Login(LoginRequest),
    /// Create an account.
    Register(RegisterRequest),
    /// Store a new forecast.
    CreateForecast(CreateForecastRequest),
    /// List every forecast.
    GetAllForecasts,
    /// List forecasts dated within the next seven days.
    GetUpcomingWeekForecasts,
    /// List forecasts within inclusive Celsius bounds.
    GetForecastsByTemperatureRange(TemperatureRangeRequest),
}

impl Request {
    /// The routing key for this request.
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Login(_) => RequestKind::Login,
            Self::Register(_) => RequestKind::Register,
            Self::CreateForecast(_) => RequestKind::CreateForecast,
            Self::GetAllForecasts => RequestKind::GetAllForecasts,
            Self::GetUpcomingWeekForecasts => RequestKind::GetUpcomingWeekForecasts,
            Self::GetForecastsByTemperatureRange(_) => RequestKind::GetForecastsByTemperatureRange,
        }
    }
}

/// Routing key: one per request variant, payload stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Authenticate and obtain an access token.
    Login,
    /// Create an account.
    Register,
    /// Store a new forecast.
    CreateForecast,
    /// List every forecast.
    GetAllForecasts,
    /// List forecasts dated within the next seven days.
    GetUpcomingWeekForecasts,
    /// List forecasts within inclusive Celsius bounds.
    GetForecastsByTemperatureRange,
}

impl RequestKind {
    /// Every routing key.
    pub const ALL: [Self; 6] = [
        Self::Login,
        Self::Register,
        Self::CreateForecast,
        Self::GetAllForecasts,
        Self::GetUpcomingWeekForecasts,
        Self::GetForecastsByTemperatureRange,
    ];
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::CreateForecast => "create-forecast",
            Self::GetAllForecasts => "get-all-forecasts",
            Self::GetUpcomingWeekForecasts => "get-upcoming-week-forecasts",
            Self::GetForecastsByTemperatureRange => "get-forecasts-by-temperature-range",
        };
        f.write_str(name)
    }
}

/// A completed operation's payload.
#[derive(Debug, Clone)]
pub enum Response {
    /// An issued access token.
    Login(LoginResponse),
    /// A registration confirmation.
    Register(RegisterResponse),
    /// A forecast creation confirmation.
    ForecastCreated(CreateForecastResponse),
    /// A forecast listing.
    ForecastList(ForecastListResponse),
    /// A temperature-range listing with its queried bounds.
    TemperatureRange(TemperatureRangeResponse),
}
