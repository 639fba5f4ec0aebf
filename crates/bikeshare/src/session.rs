//! The interactive exploration loop.
//!
//! A [`Session`] repeatedly asks for a selection, loads and filters the
//! city's trips, prints each statistics section, offers a raw-data preview,
//! and asks whether to start again. Nothing is kept between iterations.
//!
//! # Example
//!
//! ```no_run
//! use bikeshare::config::DataConfig;
//! use bikeshare::prompt::Console;
//! use bikeshare::session::Session;
//! use std::io;
//!
//! fn main() -> bikeshare::error::Result<()> {
//!     let console = Console::new(io::stdin().lock(), io::stdout());
//!     Session::new(DataConfig::default(), console).run()
//! }
//! ```

use crate::config::DataConfig;
use crate::domain::{Selection, TripDataset};
use crate::error::{Error, Result};
use crate::loader::{load_data, LoadOptions};
use crate::output::{self, OutputConfig};
use crate::prompt::Console;
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};
use std::io::{self, BufRead, Write};
use std::time::Instant;

/// Header for the time statistics section.
pub const TIME_HEADER: &str = "Calculating The Most Frequent Times of Travel...";
/// Header for the station statistics section.
pub const STATION_HEADER: &str = "Calculating The Most Popular Stations and Trip...";
/// Header for the duration statistics section.
pub const DURATION_HEADER: &str = "Calculating Trip Duration...";
/// Header for the user statistics section.
pub const USER_HEADER: &str = "Calculating User Stats...";

/// Interactive session state: configuration plus the terminal.
#[derive(Debug)]
pub struct Session<R, W> {
    config: DataConfig,
    options: LoadOptions,
    output: OutputConfig,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with strict loading and colored output.
    pub fn new(config: DataConfig, console: Console<R, W>) -> Self {
        Self {
            config,
            options: LoadOptions::default(),
            output: OutputConfig::default(),
            console,
        }
    }

    /// Set how malformed rows are handled.
    #[must_use]
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Set output styling.
    #[must_use]
    pub fn with_output_config(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Give back the console, e.g. to inspect captured output.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until the user declines to restart or closes the input.
    ///
    /// # Errors
    ///
    /// Data source and configuration errors end the session and are returned.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.run_once() {
                Ok(true) => tracing::debug!("Restarting session"),
                Ok(false) => break,
                Err(Error::InputClosed(field)) => {
                    tracing::debug!(field, "Input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// One pass: select, load, report, preview. Returns whether to go again.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be loaded or the terminal fails.
    pub fn run_once(&mut self) -> Result<bool> {
        let selection = self.console.ask_selection()?;
        let loaded = load_data(&self.config, &selection, self.options)?;

        let out = self.console.writer();
        output::write_load_warnings(out, &loaded.warnings, &self.output)?;
        write_selection_summary(out, &selection, &loaded.dataset, &self.output)?;

        self.report(&loaded.dataset)?;
        self.browse_raw(&loaded.dataset)?;

        self.console.ask_restart()
    }

    /// Print all four statistics sections for `dataset`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn report(&mut self, dataset: &TripDataset) -> Result<()> {
        self.section(
            TIME_HEADER,
            || TimeStats::compute(dataset),
            output::write_time_stats,
        )?;
        self.section(
            STATION_HEADER,
            || StationStats::compute(dataset),
            output::write_station_stats,
        )?;
        self.section(
            DURATION_HEADER,
            || DurationStats::compute(dataset),
            output::write_duration_stats,
        )?;
        self.section(
            USER_HEADER,
            || UserStats::compute(dataset),
            output::write_user_stats,
        )
    }

    /// Ask for a row count and print that many leading trips.
    ///
    /// # Errors
    ///
    /// Returns an error if input closes or writing fails.
    pub fn browse_raw(&mut self, dataset: &TripDataset) -> Result<()> {
        let n = self.console.ask_row_count()?;
        let rows = dataset.head(n);
        tracing::debug!(requested = n, shown = rows.len(), "Printing raw rows");

        let out = self.console.writer();
        output::write_raw_rows(out, rows, dataset.columns(), &self.output)?;
        output::write_rule(out)?;
        Ok(())
    }

    fn section<T>(
        &mut self,
        title: &str,
        compute: impl FnOnce() -> Option<T>,
        write: impl FnOnce(&mut W, Option<&T>, &OutputConfig) -> io::Result<()>,
    ) -> Result<()> {
        let out = self.console.writer();
        output::write_section_header(out, title, &self.output)?;

        let started = Instant::now();
        let stats = compute();
        write(out, stats.as_ref(), &self.output)?;
        output::write_elapsed(out, started.elapsed(), &self.output)?;
        Ok(())
    }
}

fn write_selection_summary<W: Write>(
    w: &mut W,
    selection: &Selection,
    dataset: &TripDataset,
    config: &OutputConfig,
) -> io::Result<()> {
    let summary = format!(
        "{} trips for {} (month: {}, day: {})",
        dataset.len(),
        selection.city,
        selection.filter.month,
        selection.filter.day
    );
    writeln!(w, "{}", output::info(&summary, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Columns;
    use crate::stats::fixtures::{dataset, trip};
    use std::io::Cursor;

    type TestSession = Session<Cursor<Vec<u8>>, Vec<u8>>;

    fn session(input: &str) -> TestSession {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::new(DataConfig::default(), console).with_output_config(OutputConfig::new(false))
    }

    fn printed(session: TestSession) -> String {
        String::from_utf8(session.into_console().into_writer()).unwrap()
    }

    #[test]
    fn test_report_prints_every_section() {
        let data = dataset(
            Columns::default(),
            vec![trip("2017-01-02 08:00:00"), trip("2017-01-03 09:00:00")],
        );
        let mut s = session("");

        s.report(&data).unwrap();

        let out = printed(s);
        for header in [TIME_HEADER, STATION_HEADER, DURATION_HEADER, USER_HEADER] {
            assert!(out.contains(header), "missing {header}");
        }
        assert_eq!(out.matches("This took").count(), 4);
        assert!(out.contains("Total travel time is 2 minutes 0 seconds"));
    }

    #[test]
    fn test_report_on_empty_dataset() {
        let mut s = session("");

        s.report(&TripDataset::default()).unwrap();

        let out = printed(s);
        assert_eq!(out.matches(output::NO_DATA).count(), 4);
    }

    #[test]
    fn test_browse_raw_prints_requested_rows() {
        let data = dataset(
            Columns::default(),
            (1..=5)
                .map(|d| trip(&format!("2017-01-0{d} 08:00:00")))
                .collect(),
        );
        let mut s = session("x\n2\n");

        s.browse_raw(&data).unwrap();

        let out = printed(s);
        assert!(out.contains("Row 2"));
        assert!(!out.contains("Row 3"));
        assert!(out.contains(crate::prompt::INVALID_ROWS));
    }

    #[test]
    fn test_run_with_missing_data_file_fails() {
        let mut s = session("washington\nall\nall\n");
        let config = DataConfig::default().with_data_dir("/nonexistent/bikeshare");
        s.config = config;

        let err = s.run().unwrap_err();
        assert!(matches!(err, Error::DataSource(_)));
    }

    #[test]
    fn test_run_ends_quietly_on_closed_input() {
        let mut s = session("chicago\n");
        s.run().unwrap();
    }
}
