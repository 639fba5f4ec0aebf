//! Domain types for trip exploration.
//!
//! This module contains the cities, the month/day filters a user can pick,
//! and (in [`trip`]) the trip records those filters apply to.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod trip;

pub use trip::{Columns, NewTrip, TripDataset, TripRecord};

/// Lowercase month names a user may filter by.
///
/// Only the first half of the year is offered; the source data ends in June.
pub const FILTER_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekdays in display order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full title-case name of a weekday (`Monday`, not `Mon`).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full name of a month number (1 = `January`).
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
}

/// A city with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    /// Chicago, IL
    #[serde(rename = "chicago")]
    Chicago,

    /// New York City, NY
    #[serde(rename = "new york city")]
    NewYorkCity,

    /// Washington, DC
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    /// Every supported city.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// The lowercase key users type and configuration files use.
    pub fn key(self) -> &'static str {
        match self {
            Self::Chicago => "chicago",
            Self::NewYorkCity => "new york city",
            Self::Washington => "washington",
        }
    }

    /// Conventional data file name for this city.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chicago => write!(f, "Chicago"),
            Self::NewYorkCity => write!(f, "New York City"),
            Self::Washington => write!(f, "Washington"),
        }
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|city| city.key() == key)
            .ok_or_else(|| format!("Unknown city: '{}'", s.trim()))
    }
}

/// Month selection: everything, or one month of the first half-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// No month filtering
    #[default]
    All,

    /// Keep only trips starting in this month (1-based)
    Month(u32),
}

impl MonthFilter {
    /// Whether a 1-based month number passes this filter.
    pub fn matches(self, month: u32) -> bool {
        match self {
            Self::All => true,
            Self::Month(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Month(m) => write!(f, "{}", month_name(*m).unwrap_or("unknown")),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "all" {
            return Ok(Self::All);
        }

        FILTER_MONTHS
            .iter()
            .position(|m| *m == name)
            .and_then(|idx| u32::try_from(idx + 1).ok())
            .map(Self::Month)
            .ok_or_else(|| format!("Unknown month: '{}'", s.trim()))
    }
}

/// Day-of-week selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    /// No day filtering
    #[default]
    All,

    /// Keep only trips starting on this weekday
    Day(Weekday),
}

impl DayFilter {
    /// Whether a weekday passes this filter.
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            Self::All => true,
            Self::Day(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Day(d) => write!(f, "{}", weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == "all" {
            return Ok(Self::All);
        }

        WEEKDAYS
            .into_iter()
            .find(|d| weekday_name(*d).eq_ignore_ascii_case(&name))
            .map(Self::Day)
            .ok_or_else(|| format!("Unknown day: '{}'", s.trim()))
    }
}

/// Combined month and day predicate applied to a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    /// Month restriction
    pub month: MonthFilter,

    /// Day-of-week restriction
    pub day: DayFilter,
}

impl TripFilter {
    /// Create a filter from its two parts.
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    /// Whether this filter keeps every record.
    pub fn is_unfiltered(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }

    /// Whether a trip passes both restrictions.
    pub fn matches(&self, trip: &TripRecord) -> bool {
        self.month.matches(trip.month()) && self.day.matches(trip.day_of_week())
    }
}

/// A full query: which city, and how to narrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// City whose data to load
    pub city: City,

    /// Month/day narrowing
    pub filter: TripFilter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::lowercase("chicago", City::Chicago)]
    #[case::mixed_case("New York City", City::NewYorkCity)]
    #[case::padded("  WASHINGTON \n", City::Washington)]
    fn test_city_parses_case_insensitively(#[case] input: &str, #[case] expected: City) {
        assert_eq!(input.parse::<City>().unwrap(), expected);
    }

    #[rstest]
    #[case::abbreviation("nyc")]
    #[case::empty("")]
    #[case::other_city("boston")]
    fn test_city_rejects_unknown(#[case] input: &str) {
        assert!(input.parse::<City>().is_err());
    }

    #[rstest]
    #[case::all("all", MonthFilter::All)]
    #[case::january("January", MonthFilter::Month(1))]
    #[case::june(" june ", MonthFilter::Month(6))]
    fn test_month_filter_parses(#[case] input: &str, #[case] expected: MonthFilter) {
        assert_eq!(input.parse::<MonthFilter>().unwrap(), expected);
    }

    #[test]
    fn test_month_filter_rejects_second_half_of_year() {
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("december".parse::<MonthFilter>().is_err());
    }

    #[rstest]
    #[case::all("ALL", DayFilter::All)]
    #[case::monday("monday", DayFilter::Day(Weekday::Mon))]
    #[case::sunday("Sunday", DayFilter::Day(Weekday::Sun))]
    fn test_day_filter_parses(#[case] input: &str, #[case] expected: DayFilter) {
        assert_eq!(input.parse::<DayFilter>().unwrap(), expected);
    }

    #[test]
    fn test_day_filter_rejects_abbreviation() {
        assert!("mon".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(MonthFilter::Month(3).to_string(), "March");
        assert_eq!(DayFilter::Day(Weekday::Wed).to_string(), "Wednesday");
        assert_eq!(City::NewYorkCity.to_string(), "New York City");
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_city_keys_round_trip_through_from_str() {
        for city in City::ALL {
            assert_eq!(city.key().parse::<City>().unwrap(), city);
        }
    }
}
