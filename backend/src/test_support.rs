//! Shared test doubles.

use chrono::{DateTime, Local, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
///
/// Lets tests control token expiry arithmetic and the upcoming-week window
/// instead of racing the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pin the clock to `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
