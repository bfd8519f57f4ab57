//! Forecast persistence port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::repository::Repository;
use super::store::StoreError;
use crate::domain::forecast::Forecast;

/// Forecast persistence with the query paths the services need, layered on
/// the generic operations via the date-window and range specifications.
#[async_trait]
pub trait ForecastRepository: Repository<Forecast> {
    /// Forecasts dated within `[today, today + 7 days]`, inclusive at both
    /// ends.
    async fn get_upcoming_week(&self, today: DateTime<Utc>) -> Result<Vec<Forecast>, StoreError>;

    /// Forecasts whose Celsius reading lies within `[min, max]`, inclusive
    /// at both ends.
    async fn get_by_temperature_range(
        &self,
        min: i32,
        max: i32,
    ) -> Result<Vec<Forecast>, StoreError>;
}
