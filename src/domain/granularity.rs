use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid granularity: {0} (expected day, week, month or year)")]
pub struct InvalidGranularity(pub String);

/// Width of one time bucket. Weeks start on Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// First day of the period containing `date`.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Week => date
                .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
                .unwrap_or(date),
            Granularity::Month => date.with_day(1).unwrap_or(date),
            Granularity::Year => date.with_ordinal(1).unwrap_or(date),
        }
    }

    /// First day of the period following the one starting at `period_start`.
    /// `None` once the calendar runs out of representable dates.
    pub fn next_period_start(&self, period_start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => period_start.checked_add_days(Days::new(1)),
            Granularity::Week => period_start.checked_add_days(Days::new(7)),
            Granularity::Month => period_start.checked_add_months(Months::new(1)),
            Granularity::Year => period_start.checked_add_months(Months::new(12)),
        }
    }

    /// Nominal length of one period in days, used to scale per-period values to
    /// day-based horizons.
    pub fn nominal_days(&self) -> u32 {
        match self {
            Granularity::Day => 1,
            Granularity::Week => 7,
            Granularity::Month => 30,
            Granularity::Year => 365,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = InvalidGranularity;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            _ => Err(InvalidGranularity(value.to_string())),
        }
    }
}
