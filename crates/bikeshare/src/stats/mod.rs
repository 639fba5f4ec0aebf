//! Descriptive statistics over a trip dataset.
//!
//! Every statistic is a pure function of a [`TripDataset`](crate::domain::TripDataset).
//! Computations return `None` for an empty dataset rather than failing.
//!
//! "Most frequent" always resolves ties by first occurrence: among values
//! sharing the highest count, the one that appears earliest in the dataset
//! wins.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;

pub use duration::{DurationStats, MinutesSeconds};
pub use station::StationStats;
pub use time::TimeStats;
pub use user::{BirthYearStats, ColumnStat, UserStats};

use std::collections::HashMap;
use std::hash::Hash;

/// A value together with how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counted<T> {
    /// The value
    pub value: T,
    /// Number of occurrences
    pub count: usize,
}

/// Count occurrences of each value.
///
/// The result is ordered by descending count; values with equal counts keep
/// the order in which they were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<Counted<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<Counted<T>> = Vec::new();

    for value in values {
        if let Some(&pos) = index.get(&value) {
            counts[pos].count += 1;
        } else {
            index.insert(value.clone(), counts.len());
            counts.push(Counted { value, count: 1 });
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The most frequent value, ties broken by first occurrence.
pub fn mode<T, I>(values: I) -> Option<Counted<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::{Columns, NewTrip, TripDataset, TripRecord};
    use chrono::NaiveDateTime;

    /// A one-minute trip from `A` to `B` starting at `start`.
    pub(crate) fn trip(start: &str) -> NewTrip {
        NewTrip {
            start_time: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
            end_time: None,
            trip_duration: 60.0,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    pub(crate) fn dataset(columns: Columns, trips: Vec<NewTrip>) -> TripDataset {
        TripDataset::new(columns, trips.into_iter().map(TripRecord::from).collect())
    }
}
