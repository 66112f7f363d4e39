//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, the metabolic calculator and the LLM client.

pub mod advisor;
pub mod exercise;
pub mod food;
pub mod profile;
pub mod sleep;
pub mod weight;

pub use advisor::AdvisorService;
pub use exercise::ExerciseService;
pub use food::FoodService;
pub use profile::ProfileService;
pub use sleep::SleepService;
pub use weight::WeightService;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a NUMERIC column value for calculations
pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

/// Convert a calculated value for a NUMERIC column
pub(crate) fn f64_to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// `[start, end)` of a calendar day in UTC
pub(crate) fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_conversions() {
        let d = f64_to_decimal(72.5);
        assert_eq!(d.to_string(), "72.5");
        assert_eq!(decimal_to_f64(&d), 72.5);
        assert_eq!(f64_to_decimal(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start.to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(end - start, Duration::days(1));
    }
}
