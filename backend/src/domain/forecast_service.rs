//! Forecast service and its request and response shapes.
//!
//! Creation is the only write path and runs begin, stage, save, commit with
//! a rollback on any store fault. The queries read committed rows only and
//! always succeed with a listing, possibly empty.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::forecast::{Forecast, Temperature};
use super::outcome::Outcome;
use super::ports::{ForecastRepository, StoreError, UnitOfWork};

/// Failure message when the forecast date is absent.
pub const MISSING_DATE: &str = "Date is required.";
/// Confirmation message for a created forecast.
pub const FORECAST_CREATED: &str = "Weather forecast created successfully";

/// Payload for creating a forecast.
///
/// The date is optional on the wire; an absent date is a domain failure,
/// not a deserialization error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForecastRequest {
    /// The forecast date.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Short description of the conditions.
    pub summary: String,
}

/// Inclusive Celsius bounds for a temperature-range query.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRangeRequest {
    /// Lower bound in degrees Celsius.
    pub min_temperature: i32,
    /// Upper bound in degrees Celsius.
    pub max_temperature: i32,
}

/// One forecast as reported to callers, with the derived Fahrenheit value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastDto {
    /// Forecast identifier.
    pub id: String,
    /// The forecast date.
    pub date: DateTime<Utc>,
    /// Temperature in degrees Celsius.
    pub temperature_c: i32,
    /// Temperature in degrees Fahrenheit, derived from the Celsius value.
    pub temperature_f: i32,
    /// Short description of the conditions.
    pub summary: String,
}

impl ForecastDto {
    /// Project a stored forecast into its reported shape.
    #[must_use]
    pub fn from_entity(forecast: &Forecast) -> Self {
        Self {
            id: forecast.id().to_string(),
            date: forecast.date(),
            temperature_c: forecast.temperature().celsius(),
            temperature_f: forecast.temperature().fahrenheit(),
            summary: forecast.summary().to_owned(),
        }
    }
}

/// A forecast listing plus its length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastListResponse {
    /// The forecasts, in store order.
    pub forecasts: Vec<ForecastDto>,
    /// Number of forecasts in the listing.
    pub count: usize,
}

impl ForecastListResponse {
    /// Project stored forecasts into a listing.
    #[must_use]
    pub fn from_entities(forecasts: &[Forecast]) -> Self {
        let forecasts: Vec<_> = forecasts.iter().map(ForecastDto::from_entity).collect();
        let count = forecasts.len();
        Self { forecasts, count }
    }
}

/// A temperature-range listing echoing the queried bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRangeResponse {
    /// The matching forecasts, in store order.
    pub forecasts: Vec<ForecastDto>,
    /// Number of matching forecasts.
    pub count: usize,
    /// The queried lower bound in degrees Celsius.
    pub min_temperature: i32,
    /// The queried upper bound in degrees Celsius.
    pub max_temperature: i32,
}

/// Confirmation for a created forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForecastResponse {
    /// Identifier assigned to the new forecast.
    pub id: String,
    /// The forecast date as stored.
    pub date: DateTime<Utc>,
    /// Confirmation message.
    pub message: String,
}

/// Forecast operations over forecast persistence.
#[derive(Clone)]
pub struct ForecastService<R, U> {
    forecasts: Arc<R>,
    unit_of_work: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, U> ForecastService<R, U>
where
    R: ForecastRepository,
    U: UnitOfWork,
{
    /// Create the service over its collaborators.
    pub fn new(forecasts: Arc<R>, unit_of_work: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            forecasts,
            unit_of_work,
            clock,
        }
    }

    /// Store a new forecast.
    ///
    /// An absent date is a domain failure and is rejected before the
    /// transaction opens.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when staging, flushing, or committing hits
    /// a store fault; the open transaction is rolled back first.
    pub async fn create(
        &self,
        request: &CreateForecastRequest,
    ) -> Result<Outcome<CreateForecastResponse>, StoreError> {
        let Some(date) = request.date else {
            return Ok(Outcome::failure(MISSING_DATE));
        };

        self.unit_of_work.begin_transaction().await?;
        match self.persist_forecast(date, request).await {
            Ok(response) => Ok(Outcome::success(response)),
            Err(fault) => {
                self.roll_back_after(&fault).await;
                Err(fault)
            }
        }
    }

    /// Every stored forecast.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the listing hits a store fault.
    pub async fn get_all(&self) -> Result<Outcome<ForecastListResponse>, StoreError> {
        let forecasts = self.forecasts.get_all().await?;
        Ok(Outcome::success(ForecastListResponse::from_entities(
            &forecasts,
        )))
    }

    /// Forecasts dated within the next seven days.
    ///
    /// The window starts at today's UTC midnight and both endpoints are
    /// inclusive, so a forecast dated exactly seven days out still counts.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the query hits a store fault.
    pub async fn get_upcoming_week(&self) -> Result<Outcome<ForecastListResponse>, StoreError> {
        let today = start_of_day(self.clock.utc());
        let forecasts = self.forecasts.get_upcoming_week(today).await?;
        Ok(Outcome::success(ForecastListResponse::from_entities(
            &forecasts,
        )))
    }

    /// Forecasts whose Celsius temperature lies within inclusive bounds.
    ///
    /// The bounds are echoed back in the response. An inverted range is not
    /// an error here; it simply matches nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the query hits a store fault.
    pub async fn get_by_temperature_range(
        &self,
        request: &TemperatureRangeRequest,
    ) -> Result<Outcome<TemperatureRangeResponse>, StoreError> {
        let forecasts = self
            .forecasts
            .get_by_temperature_range(request.min_temperature, request.max_temperature)
            .await?;
        let forecasts: Vec<_> = forecasts.iter().map(ForecastDto::from_entity).collect();
        let count = forecasts.len();
        Ok(Outcome::success(TemperatureRangeResponse {
            forecasts,
            count,
            min_temperature: request.min_temperature,
            max_temperature: request.max_temperature,
        }))
    }

    async fn persist_forecast(
        &self,
        date: DateTime<Utc>,
        request: &CreateForecastRequest,
    ) -> Result<CreateForecastResponse, StoreError> {
        let forecast = Forecast::new(
            date,
            Temperature::from_celsius(request.temperature_c),
            request.summary.clone(),
            self.clock.utc(),
        );
        let id = forecast.id().to_string();

        self.forecasts.add(forecast).await?;
        self.unit_of_work.save().await?;
        self.unit_of_work.commit_transaction().await?;

        Ok(CreateForecastResponse {
            id,
            date,
            message: FORECAST_CREATED.to_owned(),
        })
    }

    /// Roll back after `fault`, logging rather than masking a rollback
    /// failure so the original fault is the one the caller sees.
    async fn roll_back_after(&self, fault: &StoreError) {
        if let Err(rollback_error) = self.unit_of_work.rollback_transaction().await {
            warn!(%fault, %rollback_error, "rollback after failed forecast creation also failed");
        }
    }
}

/// Truncate an instant to its UTC midnight.
fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
#[path = "forecast_service_tests.rs"]
mod tests;
