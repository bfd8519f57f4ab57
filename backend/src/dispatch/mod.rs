//! Request dispatch: validation passes ahead of routed handlers.
//!
//! Public surface:
//! - [`Request`] / [`Response`]: the envelopes callers exchange.
//! - [`Mediator`] and [`MediatorBuilder`]: routing with one handler per
//!   request kind.
//! - [`standard_rules`]: the stock validation passes.
//! - [`wire`]: the fully assembled pipeline over both services.

pub mod handlers;
pub mod mediator;
pub mod request;
pub mod validation;

use std::sync::Arc;

pub use self::mediator::{DispatchError, Mediator, MediatorBuilder, RegistryError, RequestHandler};
pub use self::request::{Request, RequestKind, Response};
pub use self::validation::{RequestRules, standard_rules};

use self::handlers::{
    CreateForecastHandler, GetAllForecastsHandler, GetUpcomingWeekHandler, LoginHandler,
    RegisterHandler, TemperatureRangeHandler,
};
use crate::domain::auth_service::AuthService;
use crate::domain::forecast_service::ForecastService;
use crate::domain::ports::{
    ForecastRepository, PasswordHasher, TokenIssuer, UnitOfWork, UserRepository,
};

/// Assemble the standard pipeline: every handler plus the stock rules.
///
/// # Errors
///
/// Returns a [`RegistryError`] if the registry is assembled inconsistently;
/// with the fixed handler set this means a duplicated request kind.
pub fn wire<UR, FR, H, T, UA, UF>(
    auth: Arc<AuthService<UR, H, T, UA>>,
    forecasts: Arc<ForecastService<FR, UF>>,
) -> Result<Mediator, RegistryError>
where
    UR: UserRepository + 'static,
    FR: ForecastRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
    UA: UnitOfWork + 'static,
    UF: UnitOfWork + 'static,
{
    let mut builder = MediatorBuilder::new()
        .register(Box::new(LoginHandler::new(Arc::clone(&auth))))?
        .register(Box::new(RegisterHandler::new(auth)))?
        .register(Box::new(CreateForecastHandler::new(Arc::clone(&forecasts))))?
        .register(Box::new(GetAllForecastsHandler::new(Arc::clone(&forecasts))))?
        .register(Box::new(GetUpcomingWeekHandler::new(Arc::clone(&forecasts))))?
        .register(Box::new(TemperatureRangeHandler::new(forecasts)))?;

    for kind in RequestKind::ALL {
        if let Some(rules) = standard_rules(kind) {
            builder = builder.with_rules(kind, rules);
        }
    }
    builder.build()
}
