//! Rider demographics.
//!
//! Gender and birth year only exist in some sources. Whether they are
//! reported depends on the loaded dataset's [`Columns`](crate::domain::Columns),
//! not on which city was picked.

use super::{value_counts, Counted};
use crate::domain::TripDataset;

/// Outcome of a statistic over an optional column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnStat<T> {
    /// The source file has no such column
    Absent,
    /// The column exists but every value is missing
    NoData,
    /// The statistic over the present values
    Computed(T),
}

/// Earliest, latest and most common year of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    /// Smallest birth year
    pub earliest: i32,
    /// Largest birth year
    pub most_recent: i32,
    /// Most frequent birth year; the smallest one wins a tie
    pub most_common: i32,
}

impl BirthYearStats {
    fn compute(years: &[i32]) -> Option<Self> {
        let earliest = *years.iter().min()?;
        let most_recent = *years.iter().max()?;

        let counts = value_counts(years.iter().copied());
        let top = counts.first()?.count;
        let most_common = counts
            .iter()
            .filter(|c| c.count == top)
            .map(|c| c.value)
            .min()?;

        Some(Self {
            earliest,
            most_recent,
            most_common,
        })
    }
}

/// Counts per user type and, where available, gender and birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Trips per user type, most frequent first
    pub user_types: Vec<Counted<String>>,
    /// Trips per gender, most frequent first
    pub genders: ColumnStat<Vec<Counted<String>>>,
    /// Birth year summary
    pub birth_years: ColumnStat<BirthYearStats>,
}

impl UserStats {
    /// Compute over `dataset`; `None` when it holds no trips.
    ///
    /// Missing values are left out of every count.
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }
        let columns = dataset.columns();

        let user_types = value_counts(dataset.iter().filter_map(|t| t.user_type.clone()));

        let genders = if columns.gender {
            let counts = value_counts(dataset.iter().filter_map(|t| t.gender.clone()));
            if counts.is_empty() {
                ColumnStat::NoData
            } else {
                ColumnStat::Computed(counts)
            }
        } else {
            ColumnStat::Absent
        };

        let birth_years = if columns.birth_year {
            let years: Vec<i32> = dataset.iter().filter_map(|t| t.birth_year).collect();
            BirthYearStats::compute(&years).map_or(ColumnStat::NoData, ColumnStat::Computed)
        } else {
            ColumnStat::Absent
        };

        Some(Self {
            user_types,
            genders,
            birth_years,
        })
    }
}
