//! Total and average trip duration.

use std::fmt;

use crate::domain::TripDataset;

/// A whole number of seconds split into minutes and leftover seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinutesSeconds {
    /// Whole minutes
    pub minutes: u64,
    /// Remaining seconds (0-59)
    pub seconds: u64,
}

impl MinutesSeconds {
    /// Truncate `secs` to whole seconds, then split. Fractions are dropped, not rounded.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs(secs: f64) -> Self {
        let whole = if secs.is_finite() && secs > 0.0 {
            secs.trunc() as u64
        } else {
            0
        };
        Self {
            minutes: whole / 60,
            seconds: whole % 60,
        }
    }
}

impl fmt::Display for MinutesSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes {} seconds", self.minutes, self.seconds)
    }
}

/// Sum and mean of trip durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    /// Sum of all durations in seconds
    pub total_secs: f64,
    /// Arithmetic mean in seconds
    pub mean_secs: f64,
    /// Number of trips aggregated
    pub trips: usize,
}

impl DurationStats {
    /// Compute over `dataset`; `None` when it holds no trips.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        if dataset.is_empty() {
            return None;
        }

        let total_secs: f64 = dataset.iter().map(|t| t.trip_duration).sum();
        Some(Self {
            total_secs,
            mean_secs: total_secs / dataset.len() as f64,
            trips: dataset.len(),
        })
    }

    /// Total travel time.
    pub fn total(&self) -> MinutesSeconds {
        MinutesSeconds::from_secs(self.total_secs)
    }

    /// Mean travel time.
    pub fn mean(&self) -> MinutesSeconds {
        MinutesSeconds::from_secs(self.mean_secs)
    }
}
