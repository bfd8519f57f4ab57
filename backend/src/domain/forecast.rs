//! Weather forecasts and the temperature value object.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entity::Entity;

/// Unique forecast identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForecastId(Uuid);

impl ForecastId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ForecastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Temperature stored in whole degrees Celsius.
///
/// Fahrenheit is derived on read with the integer rule `C * 9 / 5 + 32`
/// (truncation toward zero) and is never stored or independently set.
/// Equality is by Celsius value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Temperature {
    celsius: i32,
}

impl Temperature {
    /// Wrap a Celsius reading.
    #[must_use]
    pub const fn from_celsius(celsius: i32) -> Self {
        Self { celsius }
    }

    /// The stored Celsius value.
    #[must_use]
    pub const fn celsius(self) -> i32 {
        self.celsius
    }

    /// Derived Fahrenheit reading.
    #[must_use]
    pub const fn fahrenheit(self) -> i32 {
        self.celsius * 9 / 5 + 32
    }
}

/// A dated weather forecast.
///
/// Constructed through [`Forecast::new`]; the explicit update operations
/// are the only mutations and each refreshes the last-updated instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    id: ForecastId,
    date: DateTime<Utc>,
    temperature: Temperature,
    summary: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Forecast {
    /// Create a forecast; the identifier is assigned here, exactly once.
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        temperature: Temperature,
        summary: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ForecastId::random(),
            date,
            temperature,
            summary: summary.into(),
            created_at,
            updated_at: None,
        }
    }

    /// Stable identifier assigned at construction.
    #[must_use]
    pub const fn id(&self) -> &ForecastId {
        &self.id
    }

    /// The forecast date.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// The forecast temperature.
    #[must_use]
    pub const fn temperature(&self) -> Temperature {
        self.temperature
    }

    /// Short description of the conditions.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Instant the forecast was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Instant of the last update, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Move the forecast to a new date.
    pub fn update_date(&mut self, date: DateTime<Utc>, now: DateTime<Utc>) {
        self.date = date;
        self.updated_at = Some(now);
    }

    /// Replace the temperature reading.
    pub fn update_temperature(&mut self, temperature: Temperature, now: DateTime<Utc>) {
        self.temperature = temperature;
        self.updated_at = Some(now);
    }

    /// Replace the summary text.
    pub fn update_summary(&mut self, summary: impl Into<String>, now: DateTime<Utc>) {
        self.summary = summary.into();
        self.updated_at = Some(now);
    }
}

impl Entity for Forecast {
    type Id = ForecastId;

    fn id(&self) -> &ForecastId {
        &self.id
    }
}
