//! Most frequent times of travel.

use chrono::Weekday;

use super::{mode, Counted};
use crate::domain::{month_name, TripDataset};

/// Popular month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStats {
    /// Most common start month (1 = January)
    pub month: Counted<u32>,
    /// Most common start weekday
    pub day_of_week: Counted<Weekday>,
    /// Most common start hour (0-23)
    pub start_hour: Counted<u32>,
}

impl TimeStats {
    /// Compute over `dataset`; `None` when it holds no trips.
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        Some(Self {
            month: mode(dataset.iter().map(|t| t.month()))?,
            day_of_week: mode(dataset.iter().map(|t| t.day_of_week()))?,
            start_hour: mode(dataset.iter().map(|t| t.start_hour()))?,
        })
    }

    /// Name of the most common month, e.g. `January`.
    pub fn month_name(&self) -> &'static str {
        month_name(self.month.value).unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Columns;
    use crate::stats::fixtures::{dataset, trip};

    #[test]
    fn test_most_common_month_is_named() {
        let data = dataset(
            Columns::default(),
            vec![
                trip("2017-01-02 08:00:00"),
                trip("2017-01-03 09:00:00"),
                trip("2017-02-06 09:00:00"),
                trip("2017-03-07 17:00:00"),
            ],
        );

        let stats = TimeStats::compute(&data).unwrap();
        assert_eq!(stats.month.value, 1);
        assert_eq!(stats.month.count, 2);
        assert_eq!(stats.month_name(), "January");
    }

    #[test]
    fn test_day_and_hour_ties_use_first_occurrence() {
        // Mon, Tue, Mon, Tue: both twice, Monday seen first
        let data = dataset(
            Columns::default(),
            vec![
                trip("2017-01-02 17:00:00"),
                trip("2017-01-03 08:00:00"),
                trip("2017-02-06 08:00:00"),
                trip("2017-03-07 17:00:00"),
            ],
        );

        let stats = TimeStats::compute(&data).unwrap();
        assert_eq!(stats.day_of_week.value, Weekday::Mon);
        assert_eq!(stats.start_hour.value, 17);
    }

    #[test]
    fn test_empty_dataset_has_no_time_stats() {
        assert_eq!(TimeStats::compute(&TripDataset::default()), None);
    }
}
