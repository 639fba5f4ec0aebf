//! Output formatting for statistics and raw trip rows.
//!
//! Every writer here takes an `impl Write` so the interactive session can
//! print to stdout while tests capture into a buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers

pub mod color;

use crate::domain::{weekday_name, Columns, TripRecord};
use crate::loader::LoadWarning;
use crate::stats::{ColumnStat, Counted, DurationStats, StationStats, TimeStats, UserStats};
use std::env;
use std::io::{self, Write};
use std::time::Duration;

pub use color::{info, warning};

use color::{bold, dimmed};

/// Width of the `----` rule closing each section.
pub const RULE_WIDTH: usize = 40;

/// Printed in place of a statistic when the selection is empty.
pub const NO_DATA: &str = "No data available for the selected filters.";

/// At most this many skipped rows are listed individually.
const MAX_LISTED_WARNINGS: usize = 5;

// ============================================================================
// Output Configuration
// ============================================================================

/// Configuration for output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an OutputConfig with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `BIKESHARE_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        let use_colors = match env::var("BIKESHARE_COLOR") {
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") => false,
            Ok(v) if v.is_empty() || v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) => {
                tracing::warn!(
                    env_var = "BIKESHARE_COLOR",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                true
            }
            Err(_) => true,
        };

        // Respect NO_COLOR standard (https://no-color.org/)
        Self {
            use_colors: use_colors && env::var("NO_COLOR").is_err(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

// ============================================================================
// Section framing
// ============================================================================

/// Print a `Calculating ...` section header.
pub fn write_section_header<W: Write>(
    w: &mut W,
    title: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(w, "\n{}\n", bold(title, config))
}

/// Print how long a section took, followed by the closing rule.
pub fn write_elapsed<W: Write>(
    w: &mut W,
    elapsed: Duration,
    config: &OutputConfig,
) -> io::Result<()> {
    let secs = format!("{:.6}", elapsed.as_secs_f64());
    writeln!(w, "\n{}", dimmed(&format!("This took {secs} seconds."), config))?;
    write_rule(w)
}

/// Print the `-` rule that separates sections.
pub fn write_rule<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))
}

fn write_no_data<W: Write>(w: &mut W, config: &OutputConfig) -> io::Result<()> {
    writeln!(w, "{}", warning(NO_DATA, config))
}

fn write_answer<W: Write, T: std::fmt::Display>(
    w: &mut W,
    label: &str,
    value: T,
    count: usize,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} {}",
        label,
        info(&value.to_string(), config),
        dimmed(&format!("(count: {count})"), config)
    )
}

// ============================================================================
// Statistics
// ============================================================================

/// Print popular travel times.
pub fn write_time_stats<W: Write>(
    w: &mut W,
    stats: Option<&TimeStats>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(stats) = stats else {
        return write_no_data(w, config);
    };

    write_answer(w, "The most common month is", stats.month_name(), stats.month.count, config)?;
    write_answer(
        w,
        "The most common day of the week is",
        weekday_name(stats.day_of_week.value),
        stats.day_of_week.count,
        config,
    )?;
    write_answer(
        w,
        "The most common start hour is",
        stats.start_hour.value,
        stats.start_hour.count,
        config,
    )
}

/// Print popular stations and trip.
pub fn write_station_stats<W: Write>(
    w: &mut W,
    stats: Option<&StationStats>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(stats) = stats else {
        return write_no_data(w, config);
    };

    let rows = [
        ("The most common Start Station is", &stats.start_station),
        ("The most common End Station is", &stats.end_station),
        ("The most common Trip is", &stats.trip),
    ];
    for (label, counted) in rows {
        write_answer(w, label, &counted.value, counted.count, config)?;
    }
    Ok(())
}

/// Print total and mean travel time.
pub fn write_duration_stats<W: Write>(
    w: &mut W,
    stats: Option<&DurationStats>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(stats) = stats else {
        return write_no_data(w, config);
    };

    writeln!(
        w,
        "Total travel time is {}",
        info(&stats.total().to_string(), config)
    )?;
    writeln!(
        w,
        "Mean travel time is {}",
        info(&stats.mean().to_string(), config)
    )
}

/// Print user type, gender and birth year summaries.
pub fn write_user_stats<W: Write>(
    w: &mut W,
    stats: Option<&UserStats>,
    config: &OutputConfig,
) -> io::Result<()> {
    let Some(stats) = stats else {
        return write_no_data(w, config);
    };

    writeln!(w, "Count of user types")?;
    write_counts(w, &stats.user_types, config)?;
    writeln!(w)?;

    match &stats.genders {
        ColumnStat::Absent => {}
        ColumnStat::NoData => writeln!(w, "Count of genders\n{}\n", dimmed("no data", config))?,
        ColumnStat::Computed(counts) => {
            writeln!(w, "Count of genders")?;
            write_counts(w, counts, config)?;
            writeln!(w)?;
        }
    }

    match &stats.birth_years {
        ColumnStat::Absent => {}
        ColumnStat::NoData => {
            writeln!(w, "Birth year {}", dimmed("no data", config))?;
        }
        ColumnStat::Computed(years) => {
            let rows = [
                ("Earliest Birth year is", years.earliest),
                ("Most Recent Birth year is", years.most_recent),
                ("Most Common Birth year is", years.most_common),
            ];
            for (label, year) in rows {
                writeln!(w, "{} {}", label, info(&year.to_string(), config))?;
            }
        }
    }
    Ok(())
}

/// Print a value/count table, values left-aligned to the longest one.
fn write_counts<W: Write>(
    w: &mut W,
    counts: &[Counted<String>],
    config: &OutputConfig,
) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(w, "{}", dimmed("no data", config));
    }

    let width = counts.iter().map(|c| c.value.len()).max().unwrap_or(0);
    for c in counts {
        writeln!(w, "{:<width$}    {}", c.value, c.count)?;
    }
    Ok(())
}

// ============================================================================
// Loading and raw rows
// ============================================================================

/// Summarize rows skipped while loading.
pub fn write_load_warnings<W: Write>(
    w: &mut W,
    warnings: &[LoadWarning],
    config: &OutputConfig,
) -> io::Result<()> {
    if warnings.is_empty() {
        return Ok(());
    }

    writeln!(
        w,
        "{}",
        warning(&format!("Skipped {} malformed row(s):", warnings.len()), config)
    )?;
    for warn in warnings.iter().take(MAX_LISTED_WARNINGS) {
        writeln!(w, "  {}", dimmed(&warn.description(), config))?;
    }
    if warnings.len() > MAX_LISTED_WARNINGS {
        writeln!(
            w,
            "  {}",
            dimmed(
                &format!("... and {} more", warnings.len() - MAX_LISTED_WARNINGS),
                config
            )
        )?;
    }
    Ok(())
}

/// Print trips one block per record, showing every column the source had.
pub fn write_raw_rows<W: Write>(
    w: &mut W,
    rows: &[TripRecord],
    columns: Columns,
    config: &OutputConfig,
) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(w, "{}", dimmed("(no rows)", config));
    }

    let missing = || dimmed("-", config);

    for (idx, trip) in rows.iter().enumerate() {
        writeln!(w, "{}", bold(&format!("Row {}", idx + 1), config))?;

        let mut fields: Vec<(&str, String)> = vec![("Start Time", trip.start_time.to_string())];
        if columns.end_time {
            fields.push((
                "End Time",
                trip.end_time.map_or_else(missing, |t| t.to_string()),
            ));
        }
        fields.push(("Trip Duration", trip.trip_duration.to_string()));
        fields.push(("Start Station", trip.start_station.clone()));
        fields.push(("End Station", trip.end_station.clone()));
        fields.push((
            "User Type",
            trip.user_type.clone().unwrap_or_else(missing),
        ));
        if columns.gender {
            fields.push(("Gender", trip.gender.clone().unwrap_or_else(missing)));
        }
        if columns.birth_year {
            fields.push((
                "Birth Year",
                trip.birth_year.map_or_else(missing, |y| y.to_string()),
            ));
        }

        for (label, value) in fields {
            let label = format!("{label}:");
            writeln!(w, "  {} {}", dimmed(&format!("{label:<14}"), config), value)?;
        }
    }
    Ok(())
}
