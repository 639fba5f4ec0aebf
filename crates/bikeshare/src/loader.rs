//! Loading trip files into datasets.
//!
//! A trip file is CSV with a header row. Columns are located by name, so
//! extra columns (such as an unnamed index) and any column order are fine.
//! Optional columns are detected per file and recorded in [`Columns`].

use crate::config::DataConfig;
use crate::domain::{Columns, NewTrip, Selection, TripDataset, TripRecord};
use crate::error::{DataSourceError, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Column names as they appear in the source files.
pub mod column {
    /// Trip start timestamp
    pub const START_TIME: &str = "Start Time";
    /// Trip end timestamp
    pub const END_TIME: &str = "End Time";
    /// Duration in seconds
    pub const TRIP_DURATION: &str = "Trip Duration";
    /// Origin station
    pub const START_STATION: &str = "Start Station";
    /// Destination station
    pub const END_STATION: &str = "End Station";
    /// Rider category
    pub const USER_TYPE: &str = "User Type";
    /// Rider gender
    pub const GENDER: &str = "Gender";
    /// Rider birth year
    pub const BIRTH_YEAR: &str = "Birth Year";
}

/// Timestamp layouts accepted for `Start Time` and `End Time`, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// How strictly to treat rows that fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Skip malformed rows with a warning instead of failing the load
    pub skip_malformed: bool,
}

/// A row that was dropped while loading with [`LoadOptions::skip_malformed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number in the source file
    pub line_number: u64,
    /// Why the row was dropped
    pub reason: String,
}

impl LoadWarning {
    /// Human-readable one-line description.
    pub fn description(&self) -> String {
        format!("line {}: skipped: {}", self.line_number, self.reason)
    }
}

/// A loaded dataset and the rows that were skipped to produce it.
#[derive(Debug, Clone, Default)]
pub struct LoadedTrips {
    /// Trips in source order
    pub dataset: TripDataset,
    /// Skipped rows, empty unless skipping was enabled
    pub warnings: Vec<LoadWarning>,
}

/// Load the configured file for the selected city and apply its filter.
///
/// # Errors
///
/// Returns an error if the city has no configured file or the file cannot
/// be read and parsed.
pub fn load_data(
    config: &DataConfig,
    selection: &Selection,
    options: LoadOptions,
) -> Result<LoadedTrips> {
    let path = config.path_for(selection.city)?;
    tracing::debug!(city = %selection.city, path = %path.display(), "Loading trip data");

    let loaded = read_trips(&path, options)?;
    let dataset = loaded.dataset.filtered(&selection.filter);

    tracing::debug!(
        loaded = loaded.dataset.len(),
        kept = dataset.len(),
        month = %selection.filter.month,
        day = %selection.filter.day,
        "Applied filter"
    );

    Ok(LoadedTrips {
        dataset,
        warnings: loaded.warnings,
    })
}

/// Read every trip in the file at `path`.
///
/// # Errors
///
/// See [`DataSourceError`].
pub fn read_trips(
    path: &Path,
    options: LoadOptions,
) -> std::result::Result<LoadedTrips, DataSourceError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataSourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => DataSourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    read_trips_from(BufReader::new(file), path, options)
}

/// Read trips from any CSV source; `source` is only used in error messages.
///
/// # Errors
///
/// See [`DataSourceError`].
pub fn read_trips_from<R: Read>(
    reader: R,
    source: &Path,
    options: LoadOptions,
) -> std::result::Result<LoadedTrips, DataSourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let csv_error = |e: csv::Error| DataSourceError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let headers = rdr.headers().map_err(csv_error)?.clone();
    let layout = Layout::from_headers(&headers, source)?;
    let columns = layout.columns();

    let mut records = Vec::new();
    let mut warnings = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let fallback_line = idx as u64 + 2;

        let row = match result {
            Ok(row) => row,
            Err(e) if options.skip_malformed && !e.is_io_error() => {
                let line_number = e
                    .position()
                    .map_or(fallback_line, csv::Position::line);
                warnings.push(skip(line_number, e.to_string()));
                continue;
            }
            Err(e) => return Err(csv_error(e)),
        };

        let line = row.position().map_or(fallback_line, csv::Position::line);
        match layout.parse_row(&row, line, source) {
            Ok(trip) => records.push(TripRecord::from(trip)),
            Err(DataSourceError::InvalidValue {
                column, value, line, ..
            }) if options.skip_malformed => {
                warnings.push(skip(line, format!("invalid {} value '{}'", column, value)));
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        path = %source.display(),
        records = records.len(),
        skipped = warnings.len(),
        gender = columns.gender,
        birth_year = columns.birth_year,
        "Read trip file"
    );

    Ok(LoadedTrips {
        dataset: TripDataset::new(columns, records),
        warnings,
    })
}

fn skip(line_number: u64, reason: String) -> LoadWarning {
    let warning = LoadWarning {
        line_number,
        reason,
    };
    tracing::warn!(line = line_number, reason = %warning.reason, "Skipping malformed row");
    warning
}

/// Positions of the known columns within a header row.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_time: usize,
    end_time: Option<usize>,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Layout {
    fn from_headers(
        headers: &StringRecord,
        source: &Path,
    ) -> std::result::Result<Self, DataSourceError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &'static str| {
            find(name).ok_or_else(|| DataSourceError::MissingColumn {
                path: source.to_path_buf(),
                column: name,
            })
        };

        Ok(Self {
            start_time: require(column::START_TIME)?,
            end_time: find(column::END_TIME),
            trip_duration: require(column::TRIP_DURATION)?,
            start_station: require(column::START_STATION)?,
            end_station: require(column::END_STATION)?,
            user_type: require(column::USER_TYPE)?,
            gender: find(column::GENDER),
            birth_year: find(column::BIRTH_YEAR),
        })
    }

    fn columns(&self) -> Columns {
        Columns {
            end_time: self.end_time.is_some(),
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        line: u64,
        source: &Path,
    ) -> std::result::Result<NewTrip, DataSourceError> {
        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let optional = |idx: Option<usize>| idx.map(cell).filter(|v| !v.is_empty());
        let invalid = |column: &'static str, value: &str| DataSourceError::InvalidValue {
            path: source.to_path_buf(),
            line,
            column,
            value: value.to_string(),
        };

        let raw_start = cell(self.start_time);
        let start_time =
            parse_timestamp(raw_start).ok_or_else(|| invalid(column::START_TIME, raw_start))?;

        // A bad End Time drops the value, not the row.
        let end_time = optional(self.end_time).and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                tracing::warn!(line, value = raw, "Ignoring unparseable End Time");
            }
            parsed
        });

        let raw_duration = cell(self.trip_duration);
        let trip_duration = parse_duration(raw_duration)
            .ok_or_else(|| invalid(column::TRIP_DURATION, raw_duration))?;

        let birth_year = match optional(self.birth_year) {
            Some(raw) => Some(parse_year(raw).ok_or_else(|| invalid(column::BIRTH_YEAR, raw))?),
            None => None,
        };

        Ok(NewTrip {
            start_time,
            end_time,
            trip_duration,
            start_station: cell(self.start_station).to_string(),
            end_station: cell(self.end_station).to_string(),
            user_type: Some(cell(self.user_type))
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            gender: optional(self.gender).map(str::to_string),
            birth_year,
        })
    }
}

/// Parse a timestamp in any of the accepted layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Durations are non-negative seconds, integer or decimal.
fn parse_duration(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
}

/// Years appear as `1989` or `1989.0` depending on the source.
#[allow(clippy::cast_possible_truncation)]
fn parse_year(value: &str) -> Option<i32> {
    if let Ok(year) = value.parse::<i32>() {
        return Some(year);
    }

    value
        .parse::<f64>()
        .ok()
        .filter(|y| y.is_finite() && y.fract() == 0.0 && y.abs() < f64::from(i32::MAX))
        .map(|y| y as i32)
}
