//! Composable query predicates.
//!
//! A specification captures one named condition over an entity and nothing
//! else: no I/O, no state beyond its construction parameters. Repositories
//! translate a specification into whatever filtering the store supports;
//! the in-memory store applies it row by row. Each query path uses exactly
//! one specification; composing conditions means constructing a new
//! parameterized value, not combining predicates at runtime.

use chrono::{DateTime, Duration, Utc};

use super::forecast::Forecast;
use super::user::User;

/// A predicate over entity type `E`.
pub trait Specification<E>: Send + Sync {
    /// Does `candidate` satisfy this condition?
    fn is_satisfied_by(&self, candidate: &E) -> bool;
}

/// Forecasts whose Celsius reading lies within a range, both ends
/// inclusive.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureRangeSpecification {
    min: i32,
    max: i32,
}

impl TemperatureRangeSpecification {
    /// Predicate for `min <= celsius <= max`.
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }
}

impl Specification<Forecast> for TemperatureRangeSpecification {
    fn is_satisfied_by(&self, candidate: &Forecast) -> bool {
        (self.min..=self.max).contains(&candidate.temperature().celsius())
    }
}

/// Forecasts dated within a window, both ends inclusive.
#[derive(Debug, Clone, Copy)]
pub struct DateRangeSpecification {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRangeSpecification {
    /// Predicate for `start <= date <= end`.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

impl Specification<Forecast> for DateRangeSpecification {
    fn is_satisfied_by(&self, candidate: &Forecast) -> bool {
        let date = candidate.date();
        self.start <= date && date <= self.end
    }
}

/// Forecasts dated within the seven days starting at `today`.
#[derive(Debug, Clone, Copy)]
pub struct UpcomingWeekSpecification {
    window: DateRangeSpecification,
}

impl UpcomingWeekSpecification {
    /// Window of `[today, today + 7 days]`, inclusive at both ends.
    #[must_use]
    pub fn starting(today: DateTime<Utc>) -> Self {
        Self {
            window: DateRangeSpecification::new(today, today + Duration::days(7)),
        }
    }
}

impl Specification<Forecast> for UpcomingWeekSpecification {
    fn is_satisfied_by(&self, candidate: &Forecast) -> bool {
        self.window.is_satisfied_by(candidate)
    }
}

/// Users whose email equals a value exactly (ordinal comparison).
#[derive(Debug, Clone)]
pub struct EmailEqualsSpecification {
    email: String,
}

impl EmailEqualsSpecification {
    /// Predicate for `email == value`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl Specification<User> for EmailEqualsSpecification {
    fn is_satisfied_by(&self, candidate: &User) -> bool {
        candidate.email() == self.email
    }
}

/// Forecasts whose summary contains a term, case-insensitively.
#[derive(Debug, Clone)]
pub struct SummaryContainsSpecification {
    term: String,
}

impl SummaryContainsSpecification {
    /// Predicate for `summary contains term`, ignoring case.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into().to_lowercase(),
        }
    }
}

impl Specification<Forecast> for SummaryContainsSpecification {
    fn is_satisfied_by(&self, candidate: &Forecast) -> bool {
        candidate.summary().to_lowercase().contains(&self.term)
    }
}
