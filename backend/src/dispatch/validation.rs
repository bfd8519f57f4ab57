//! Request validation rules.
//!
//! Rules run before routing. Every rule for a request kind runs and every
//! violation is collected in rule order, so a caller sees the whole list in
//! one round trip rather than one message per attempt.

use std::sync::OnceLock;

use regex::Regex;

use super::request::{Request, RequestKind};
use crate::domain::auth::{LoginRequest, Password, RegisterRequest};
use crate::domain::forecast_service::{
    CreateForecastRequest, MISSING_DATE, TemperatureRangeRequest,
};

/// A validation pass over a request, yielding violation messages.
pub type RequestRules = fn(&Request) -> Vec<String>;

/// Least Celsius reading a forecast may carry.
pub const MIN_TEMPERATURE_C: i32 = -100;
/// Greatest Celsius reading a forecast may carry.
pub const MAX_TEMPERATURE_C: i32 = 100;
/// Longest summary a forecast may carry, in characters.
pub const MAX_SUMMARY_LENGTH: usize = 150;
/// Shortest password an account may use, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// The standard rule pass for `kind`, where one exists.
///
/// The plain listings carry no payload, so there is nothing to validate.
#[must_use]
pub fn standard_rules(kind: RequestKind) -> Option<RequestRules> {
    match kind {
        RequestKind::Login => Some(validate_login),
        RequestKind::Register => Some(validate_register),
        RequestKind::CreateForecast => Some(validate_create_forecast),
        RequestKind::GetForecastsByTemperatureRange => Some(validate_temperature_range),
        RequestKind::GetAllForecasts | RequestKind::GetUpcomingWeekForecasts => None,
    }
}

/// Violations for a login payload.
#[must_use]
pub fn login_rules(request: &LoginRequest) -> Vec<String> {
    let mut violations = Vec::new();
    push_email_rules(&mut violations, &request.email);
    push_password_rules(&mut violations, &request.password);
    violations
}

/// Violations for a registration payload. Same credential rules as login.
#[must_use]
pub fn register_rules(request: &RegisterRequest) -> Vec<String> {
    let mut violations = Vec::new();
    push_email_rules(&mut violations, &request.email);
    push_password_rules(&mut violations, &request.password);
    violations
}

/// Violations for a forecast creation payload.
#[must_use]
pub fn create_forecast_rules(request: &CreateForecastRequest) -> Vec<String> {
    let mut violations = Vec::new();
    if request.date.is_none() {
        violations.push(MISSING_DATE.to_owned());
    }
    if !in_celsius_bounds(request.temperature_c) {
        violations.push(format!(
            "Temperature must be between {MIN_TEMPERATURE_C} and {MAX_TEMPERATURE_C} degrees Celsius."
        ));
    }
    if request.summary.is_empty() {
        violations.push("Summary is required.".to_owned());
    }
    if request.summary.chars().count() > MAX_SUMMARY_LENGTH {
        violations.push(format!(
            "Summary must be at most {MAX_SUMMARY_LENGTH} characters."
        ));
    }
    violations
}

/// Violations for a temperature-range query.
#[must_use]
pub fn temperature_range_rules(request: &TemperatureRangeRequest) -> Vec<String> {
    let mut violations = Vec::new();
    if !in_celsius_bounds(request.min_temperature) {
        violations.push(format!(
            "Minimum temperature must be between {MIN_TEMPERATURE_C} and {MAX_TEMPERATURE_C} degrees Celsius"
        ));
    }
    if !in_celsius_bounds(request.max_temperature) {
        violations.push(format!(
            "Maximum temperature must be between {MIN_TEMPERATURE_C} and {MAX_TEMPERATURE_C} degrees Celsius"
        ));
    }
    if request.max_temperature < request.min_temperature {
        violations.push(
            "Maximum temperature must be greater than or equal to minimum temperature".to_owned(),
        );
    }
    violations
}

fn validate_login(request: &Request) -> Vec<String> {
    match request {
        Request::Login(payload) => login_rules(payload),
        _ => Vec::new(),
    }
}

fn validate_register(request: &Request) -> Vec<String> {
    match request {
        Request::Register(payload) => register_rules(payload),
        _ => Vec::new(),
    }
}

fn validate_create_forecast(request: &Request) -> Vec<String> {
    match request {
        Request::CreateForecast(payload) => create_forecast_rules(payload),
        _ => Vec::new(),
    }
}

fn validate_temperature_range(request: &Request) -> Vec<String> {
    match request {
        Request::GetForecastsByTemperatureRange(payload) => temperature_range_rules(payload),
        _ => Vec::new(),
    }
}

fn push_email_rules(violations: &mut Vec<String>, email: &str) {
    if email.is_empty() {
        violations.push("Email is required.".to_owned());
    }
    if !email_pattern().is_match(email) {
        violations.push("Invalid email format.".to_owned());
    }
}

fn push_password_rules(violations: &mut Vec<String>, password: &Password) {
    if password.is_empty() {
        violations.push("Password is required.".to_owned());
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        violations.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
}

const fn in_celsius_bounds(value: i32) -> bool {
    MIN_TEMPERATURE_C <= value && value <= MAX_TEMPERATURE_C
}

/// One non-whitespace local part, an `@`, and a domain containing a dot.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email pattern must compile: {error}"))
    })
}
