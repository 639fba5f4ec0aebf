//! Most popular stations and trip.

use super::{mode, Counted};
use crate::domain::TripDataset;

/// Popular start station, end station, and start/end pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    /// Most common start station
    pub start_station: Counted<String>,
    /// Most common end station
    pub end_station: Counted<String>,
    /// Most common `"{start} to {end}"` trip
    pub trip: Counted<String>,
}

impl StationStats {
    /// Compute over `dataset`; `None` when it holds no trips.
    pub fn compute(dataset: &TripDataset) -> Option<Self> {
        let start_station = mode(dataset.iter().map(|t| t.start_station.as_str()))?;
        let end_station = mode(dataset.iter().map(|t| t.end_station.as_str()))?;
        let trip = mode(dataset.iter().map(|t| t.trip_label()))?;

        Some(Self {
            start_station: owned(start_station),
            end_station: owned(end_station),
            trip: owned(trip),
        })
    }
}

fn owned(counted: Counted<&str>) -> Counted<String> {
    Counted {
        value: counted.value.to_string(),
        count: counted.count,
    }
}
