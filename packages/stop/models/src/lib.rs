#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Traffic stop record types for the `SecureCheck` dashboard.
//!
//! A [`StopRecord`] is one row of the `police_check` table. The table is
//! read-only to the dashboard; these types exist so fixtures, filters and
//! charts agree on field names and value shapes. Column names are exported
//! from [`columns`] and are the single source of truth for anything that
//! indexes a fetched result by name.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Name of the table every dashboard query reads from.
pub const TABLE_NAME: &str = "police_check";

/// Column names of the `police_check` table.
pub mod columns {
    pub const STOP_DATE: &str = "stop_date";
    pub const STOP_TIME: &str = "stop_time";
    pub const TIMESTAMP: &str = "timestamp";
    pub const COUNTRY_NAME: &str = "country_name";
    pub const DRIVER_GENDER: &str = "driver_gender";
    pub const DRIVER_AGE: &str = "driver_age";
    pub const DRIVER_RACE: &str = "driver_race";
    pub const SEARCH_CONDUCTED: &str = "search_conducted";
    pub const SEARCH_TYPE: &str = "search_type";
    pub const DRUGS_STOP: &str = "drugs_stop";
    pub const STOP_DURATION: &str = "stop_duration";
    pub const STOP_OUTCOME: &str = "stop_outcome";
    pub const VIOLATION: &str = "violation";
    pub const VEHICLE_NUMBER: &str = "vehicle_number";

    /// All columns in table order.
    pub const ALL: &[&str] = &[
        STOP_DATE,
        STOP_TIME,
        TIMESTAMP,
        COUNTRY_NAME,
        DRIVER_GENDER,
        DRIVER_AGE,
        DRIVER_RACE,
        SEARCH_CONDUCTED,
        SEARCH_TYPE,
        DRUGS_STOP,
        STOP_DURATION,
        STOP_OUTCOME,
        VIOLATION,
        VEHICLE_NUMBER,
    ];
}

/// Youngest driver age accepted for a new log entry.
pub const MIN_DRIVER_AGE: i64 = 16;

/// Oldest driver age accepted for a new log entry.
pub const MAX_DRIVER_AGE: i64 = 100;

/// Driver gender as recorded in `driver_gender`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Male, Self::Female]
    }
}

/// A single traffic stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRecord {
    /// Date of the stop.
    pub stop_date: Option<NaiveDate>,
    /// Time of day of the stop.
    pub stop_time: Option<NaiveTime>,
    /// Combined date and time, when the source provided one.
    pub timestamp: Option<NaiveDateTime>,
    /// Country the stop happened in.
    pub country_name: String,
    /// Driver gender.
    pub driver_gender: Gender,
    /// Driver age in years.
    pub driver_age: i64,
    /// Driver race (free text).
    pub driver_race: String,
    /// Whether the vehicle or driver was searched.
    pub search_conducted: bool,
    /// Kind of search, if one was conducted.
    pub search_type: Option<String>,
    /// Whether the stop was drug-related.
    pub drugs_stop: bool,
    /// Duration bucket, e.g. `0-15 Min`.
    pub stop_duration: String,
    /// Outcome, e.g. `Warning`, `Citation`, `Arrest`.
    pub stop_outcome: String,
    /// Violation that caused the stop.
    pub violation: String,
    /// Vehicle registration number.
    pub vehicle_number: String,
}

/// A stop entered through the "new police log" form.
///
/// The form mirrors [`StopRecord`] minus the outcome and violation, which
/// are what the dashboard predicts. Submitting it never writes to the
/// store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStopLog {
    pub stop_date: NaiveDate,
    pub stop_time: NaiveTime,
    pub country_name: String,
    pub driver_gender: Gender,
    pub driver_age: i64,
    pub driver_race: String,
    pub search_conducted: bool,
    pub search_type: String,
    pub drugs_stop: bool,
    pub stop_duration: String,
    pub vehicle_number: String,
}

/// Error returned when a [`NewStopLog`] carries an age outside
/// [`MIN_DRIVER_AGE`]..=[`MAX_DRIVER_AGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidAgeError {
    /// The rejected age.
    pub age: i64,
}

impl std::fmt::Display for InvalidAgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid driver age {}: expected {MIN_DRIVER_AGE}-{MAX_DRIVER_AGE}",
            self.age
        )
    }
}

impl std::error::Error for InvalidAgeError {}

impl NewStopLog {
    /// Checks the constraints the entry form enforces.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAgeError`] if the driver age is out of range.
    pub const fn validate(&self) -> Result<(), InvalidAgeError> {
        if self.driver_age < MIN_DRIVER_AGE || self.driver_age > MAX_DRIVER_AGE {
            return Err(InvalidAgeError {
                age: self.driver_age,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with_age(age: i64) -> NewStopLog {
        NewStopLog {
            stop_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            stop_time: NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
            country_name: "Canada".to_string(),
            driver_gender: Gender::Female,
            driver_age: age,
            driver_race: "Asian".to_string(),
            search_conducted: false,
            search_type: String::new(),
            drugs_stop: false,
            stop_duration: "0-15 Min".to_string(),
            vehicle_number: "ABC123".to_string(),
        }
    }

    #[test]
    fn gender_parses_lowercase() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(Gender::Female.to_string(), "female");
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(log_with_age(MIN_DRIVER_AGE).validate().is_ok());
        assert!(log_with_age(MAX_DRIVER_AGE).validate().is_ok());
        assert_eq!(
            log_with_age(15).validate(),
            Err(InvalidAgeError { age: 15 })
        );
        assert!(log_with_age(101).validate().is_err());
    }

    #[test]
    fn column_names_are_unique() {
        let mut names = columns::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), columns::ALL.len());
    }
}
