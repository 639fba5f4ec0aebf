//! Trip records and the datasets they are loaded into.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use super::TripFilter;

/// Fields read from one row of a trip file, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    /// When the rental began
    pub start_time: NaiveDateTime,

    /// When the bike was returned (absent in some sources)
    pub end_time: Option<NaiveDateTime>,

    /// Length of the trip in seconds
    pub trip_duration: f64,

    /// Station the trip began at
    pub start_station: String,

    /// Station the trip ended at
    pub end_station: String,

    /// Rider category, e.g. `Subscriber`
    pub user_type: Option<String>,

    /// Rider gender
    pub gender: Option<String>,

    /// Rider year of birth
    pub birth_year: Option<i32>,
}

/// One bicycle trip with its derived attributes.
///
/// The month, weekday, start hour and trip label are computed once when the
/// record is built and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// When the rental began
    pub start_time: NaiveDateTime,

    /// When the bike was returned (absent in some sources)
    pub end_time: Option<NaiveDateTime>,

    /// Length of the trip in seconds
    pub trip_duration: f64,

    /// Station the trip began at
    pub start_station: String,

    /// Station the trip ended at
    pub end_station: String,

    /// Rider category, e.g. `Subscriber`
    pub user_type: Option<String>,

    /// Rider gender
    pub gender: Option<String>,

    /// Rider year of birth
    pub birth_year: Option<i32>,

    month: u32,
    day_of_week: Weekday,
    start_hour: u32,
    trip_label: String,
}

impl TripRecord {
    /// Month the trip started in (1 = January).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Weekday the trip started on.
    pub fn day_of_week(&self) -> Weekday {
        self.day_of_week
    }

    /// Hour of day the trip started in (0-23).
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// `"{start_station} to {end_station}"`
    pub fn trip_label(&self) -> &str {
        &self.trip_label
    }
}

impl From<NewTrip> for TripRecord {
    fn from(trip: NewTrip) -> Self {
        let trip_label = format!("{} to {}", trip.start_station, trip.end_station);
        Self {
            month: trip.start_time.month(),
            day_of_week: trip.start_time.weekday(),
            start_hour: trip.start_time.hour(),
            trip_label,
            start_time: trip.start_time,
            end_time: trip.end_time,
            trip_duration: trip.trip_duration,
            start_station: trip.start_station,
            end_station: trip.end_station,
            user_type: trip.user_type,
            gender: trip.gender,
            birth_year: trip.birth_year,
        }
    }
}

/// Optional columns a source file carried.
///
/// Statistics consult this instead of assuming a layout per city.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Columns {
    /// `End Time` was present
    pub end_time: bool,

    /// `Gender` was present
    pub gender: bool,

    /// `Birth Year` was present
    pub birth_year: bool,
}

impl Columns {
    /// Every optional column present.
    pub fn all() -> Self {
        Self {
            end_time: true,
            gender: true,
            birth_year: true,
        }
    }
}

/// An ordered, immutable collection of trips from one source.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripDataset {
    columns: Columns,
    records: Vec<TripRecord>,
}

impl TripDataset {
    /// Build a dataset from records in source order.
    pub fn new(columns: Columns, records: Vec<TripRecord>) -> Self {
        Self { columns, records }
    }

    /// Optional columns available in this dataset.
    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// All records in source order.
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Iterate records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `n` records, or all of them if there are fewer.
    pub fn head(&self, n: usize) -> &[TripRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// A new dataset holding only the records `filter` keeps, in the same order.
    pub fn filtered(&self, filter: &TripFilter) -> TripDataset {
        if filter.is_unfiltered() {
            return self.clone();
        }

        let records = self
            .records
            .iter()
            .filter(|trip| filter.matches(trip))
            .cloned()
            .collect();

        TripDataset {
            columns: self.columns,
            records,
        }
    }
}

impl<'a> IntoIterator for &'a TripDataset {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
