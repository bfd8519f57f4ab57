//! Demo data seeding.
//!
//! Seeds one administrator account and a month of forecasts into an empty
//! store, inside a single transaction. Each part is skipped when the store
//! already holds it, so seeding is safe to run on every startup.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use mockable::Clock;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::forecast::{Forecast, Temperature};
use super::ports::{ForecastRepository, PasswordHasher, StoreError, UnitOfWork, UserRepository};
use super::user::User;

/// Email of the seeded administrator account.
pub const ADMIN_EMAIL: &str = "admin@example.com";
/// Password of the seeded administrator account.
pub const ADMIN_PASSWORD: &str = "Admin@123";
/// Number of forecasts seeded into an empty store, one per day.
pub const FORECAST_COUNT: usize = 30;
/// The summaries a seeded forecast draws from.
pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

// Celsius bounds for seeded readings; the upper bound is exclusive.
const MIN_SEED_CELSIUS: i32 = -20;
const MAX_SEED_CELSIUS: i32 = 55;

/// Seeds the store with the demo administrator and forecasts.
#[derive(Clone)]
pub struct SeedService<UR, FR, H, U> {
    users: Arc<UR>,
    forecasts: Arc<FR>,
    hasher: Arc<H>,
    unit_of_work: Arc<U>,
    clock: Arc<dyn Clock>,
    rng_seed: Option<u64>,
}

impl<UR, FR, H, U> SeedService<UR, FR, H, U>
where
    UR: UserRepository,
    FR: ForecastRepository,
    H: PasswordHasher,
    U: UnitOfWork,
{
    /// Create the service over its collaborators, drawing forecast data
    /// from entropy.
    pub fn new(
        users: Arc<UR>,
        forecasts: Arc<FR>,
        hasher: Arc<H>,
        unit_of_work: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            forecasts,
            hasher,
            unit_of_work,
            clock,
            rng_seed: None,
        }
    }

    /// Draw forecast data from a fixed seed instead of entropy.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Seed whatever the store is missing, atomically.
    ///
    /// The administrator account and the forecast set are staged
    /// independently; either is skipped when already present. Both land in
    /// one transaction, so a store that was empty ends up fully seeded or
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when staging, flushing, or committing hits
    /// a store fault; the open transaction is rolled back first.
    pub async fn seed(&self) -> Result<(), StoreError> {
        self.unit_of_work.begin_transaction().await?;
        match self.stage_and_commit().await {
            Ok(()) => Ok(()),
            Err(fault) => {
                self.roll_back_after(&fault).await;
                Err(fault)
            }
        }
    }

    async fn stage_and_commit(&self) -> Result<(), StoreError> {
        let seeded_user = self.stage_admin_user().await?;
        let seeded_forecasts = self.stage_forecasts().await?;
        let affected = self.unit_of_work.save().await?;
        self.unit_of_work.commit_transaction().await?;
        debug!(seeded_user, seeded_forecasts, affected, "seed transaction committed");
        Ok(())
    }

    async fn stage_admin_user(&self) -> Result<bool, StoreError> {
        if self.users.get_by_email(ADMIN_EMAIL).await?.is_some() {
            debug!("administrator account already present; skipping");
            return Ok(false);
        }

        let hash = self.hasher.hash(ADMIN_PASSWORD);
        self.users
            .add(User::new(ADMIN_EMAIL.to_owned(), hash, self.clock.utc()))
            .await?;
        info!(email = ADMIN_EMAIL, "seeded administrator account");
        Ok(true)
    }

    async fn stage_forecasts(&self) -> Result<bool, StoreError> {
        if !self.forecasts.get_all().await?.is_empty() {
            debug!("forecasts already present; skipping");
            return Ok(false);
        }

        let mut rng = self.rng();
        let now = self.clock.utc();
        let mut date = start_of_day(now);
        for _ in 0..FORECAST_COUNT {
            let celsius = rng.gen_range(MIN_SEED_CELSIUS..MAX_SEED_CELSIUS);
            let summary = SUMMARIES.choose(&mut rng).copied().unwrap_or(SUMMARIES[0]);
            self.forecasts
                .add(Forecast::new(
                    date,
                    Temperature::from_celsius(celsius),
                    summary,
                    now,
                ))
                .await?;
            date += Duration::days(1);
        }
        info!(count = FORECAST_COUNT, "seeded demo forecasts");
        Ok(true)
    }

    fn rng(&self) -> SmallRng {
        self.rng_seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64)
    }

    /// Roll back after `fault`, logging rather than masking a rollback
    /// failure so the original fault is the one the caller sees.
    async fn roll_back_after(&self, fault: &StoreError) {
        if let Err(rollback_error) = self.unit_of_work.rollback_transaction().await {
            warn!(%fault, %rollback_error, "rollback after failed seeding also failed");
        }
    }
}

/// Truncate an instant to its UTC midnight.
fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
#[path = "seed_service_tests.rs"]
mod tests;
