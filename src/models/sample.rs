//! Sample types shared between data sources and the statistics engine.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::variable::WeatherVariable;

/// A single historical observation: one value for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Calendar year the observation belongs to
    pub year: i32,
    /// Observed value in the variable's display units
    pub value: f64,
}

impl Sample {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// A recurring calendar date (month + day) independent of year.
///
/// Analyses are anchored to a day of the year ("July 15th") rather than a
/// specific date, since the same calendar day is sampled across many years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDate {
    pub month: u32,
    pub day: u32,
}

impl TargetDate {
    /// Create a target date, validating month/day against the calendar.
    /// February 29th is accepted (validated against a leap year).
    pub fn new(month: u32, day: u32) -> Result<Self, String> {
        // Reference leap year so 02-29 validates.
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or_else(|| format!("Invalid calendar date {:02}-{:02}", month, day))
    }

    /// Parse a date string in one of the accepted formats.
    ///
    /// Accepts a bare `MM-DD` as well as full dates (`YYYY-MM-DD`,
    /// `MM-DD-YYYY`, `DD/MM/YYYY`, `MM/DD/YYYY`); the year component of a
    /// full date is ignored.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();

        for format in ["%Y-%m-%d", "%m-%d-%Y", "%d/%m/%Y", "%m/%d/%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Self::new(date.month(), date.day());
            }
        }

        // Bare month-day form.
        if let Some((month_str, day_str)) = trimmed.split_once('-') {
            if let (Ok(month), Ok(day)) = (month_str.parse::<u32>(), day_str.parse::<u32>()) {
                return Self::new(month, day);
            }
        }

        Err(format!("Unable to parse date '{}'", input))
    }

    /// Day of year (1-366), computed against a leap reference year.
    pub fn day_of_year(&self) -> u32 {
        NaiveDate::from_ymd_opt(2000, self.month, self.day)
            .map(|d| d.ordinal())
            .unwrap_or(1)
    }

    /// The target date shifted by a number of days, wrapping across year
    /// boundaries (used for date-window pooling).
    pub fn offset_days(&self, days: i32) -> Self {
        let base = NaiveDate::from_ymd_opt(2000, self.month, self.day)
            .unwrap_or(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default());
        let shifted = base + Duration::days(days as i64);
        Self {
            month: shifted.month(),
            day: shifted.day(),
        }
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Everything a sample source needs to produce a historical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleQuery {
    /// Variable to sample
    pub variable: WeatherVariable,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Calendar date the analysis is anchored to
    pub target: TargetDate,
    /// Number of historical years to cover
    pub years: u32,
    /// Days pooled on each side of the target date
    pub window_days: u32,
    /// Fixed seed for reproducible sample generation
    pub seed: Option<u64>,
}
